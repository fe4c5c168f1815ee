//! Gated history correction.
//!
//! Steps run strictly in order and every gate before the backup is free of
//! side effects: tool check, collect mismatches, summary, signature warning,
//! typed confirmation. Only then are the mirror backup, the mailmap, the
//! rewrite and the remote cleanup performed. A failed rewrite is never
//! rolled back; the backup path is reported instead.

use crate::backup::create_mirror_backup;
use crate::git::Git;
use crate::mailmap::Mailmap;
use crate::{Error, Result};
use gitid_types::ScanResult;
use std::path::{Path, PathBuf};

/// Phrase the operator must type to allow a rewrite
pub const CONFIRMATION_PHRASE: &str = "rewrite history";

#[derive(Debug, Clone)]
pub struct FixOptions {
    /// Exact, case-sensitive phrase; compared after trimming the reply
    pub confirmation_phrase: String,
    /// Where the mailmap temp file is created
    pub scratch_dir: PathBuf,
}

impl Default for FixOptions {
    fn default() -> Self {
        Self {
            confirmation_phrase: CONFIRMATION_PHRASE.to_string(),
            scratch_dir: std::env::temp_dir(),
        }
    }
}

/// What the operator is shown before confirming
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixSummary {
    pub expected_email: String,
    pub mismatches: usize,
    pub local_only: usize,
    pub pushed: usize,
    pub wrong_emails: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixStep {
    CreatingBackup,
    BackupCreated(PathBuf),
    Rewriting { entries: usize },
    RemovingRemotes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remote {
    pub name: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixReport {
    pub backup_path: PathBuf,
    pub rewritten: usize,
    /// Remotes removed after the rewrite, with their URLs for re-adding
    pub removed_remotes: Vec<Remote>,
    pub warnings: Vec<String>,
}

/// Operator-facing side of the workflow
pub trait FixInteraction {
    fn show_summary(&mut self, summary: &FixSummary);
    fn show_signature_warning(&mut self);
    /// Ask the operator to type `phrase`; returns the raw reply
    fn prompt_confirmation(&mut self, phrase: &str) -> Result<String>;
    fn show_progress(&mut self, step: &FixStep);
    fn show_warning(&mut self, message: &str);
}

/// Repository mutations the workflow performs
pub trait RewriteBackend {
    fn tool_available(&self) -> bool;
    fn create_backup(&self) -> Result<PathBuf>;
    fn remotes(&self) -> Result<Vec<Remote>>;
    fn rewrite(&self, mailmap: &Path) -> Result<()>;
    fn remove_remote(&self, name: &str) -> Result<()>;
}

/// Rewrite mismatched author emails in `scan` to the expected email
pub fn fix(
    scan: &ScanResult,
    backend: &dyn RewriteBackend,
    ui: &mut dyn FixInteraction,
    options: &FixOptions,
) -> Result<FixReport> {
    if !backend.tool_available() {
        return Err(Error::ToolUnavailable);
    }

    let expected_email = match scan.expected_email.as_deref() {
        Some(email) if scan.mismatch_count > 0 => email,
        _ => return Err(Error::NothingToFix),
    };
    let mailmap = Mailmap::from_mismatches(expected_email, scan.mismatches());
    if mailmap.is_empty() {
        return Err(Error::NothingToFix);
    }

    let (local_only, pushed) = scan.mismatch_split();
    ui.show_summary(&FixSummary {
        expected_email: expected_email.to_string(),
        mismatches: scan.mismatch_count,
        local_only,
        pushed,
        wrong_emails: mailmap
            .entries()
            .iter()
            .map(|e| e.wrong_email.clone())
            .collect(),
    });
    ui.show_signature_warning();

    let reply = ui.prompt_confirmation(&options.confirmation_phrase)?;
    if reply.trim() != options.confirmation_phrase {
        tracing::info!("confirmation phrase mismatch; aborting before any change");
        return Err(Error::Aborted);
    }

    ui.show_progress(&FixStep::CreatingBackup);
    let backup_path = backend.create_backup()?;
    ui.show_progress(&FixStep::BackupCreated(backup_path.clone()));

    // held until return so the file outlives the rewrite on every path
    let mailmap_file = mailmap.write_temp(&options.scratch_dir)?;
    let remotes = backend.remotes()?;

    ui.show_progress(&FixStep::Rewriting {
        entries: mailmap.len(),
    });
    if let Err(err) = backend.rewrite(mailmap_file.path()) {
        tracing::error!(error = %err, backup = %backup_path.display(), "history rewrite failed");
        return Err(Error::RewriteFailed {
            backup: backup_path,
            reason: err.to_string(),
        });
    }

    ui.show_progress(&FixStep::RemovingRemotes);
    let mut removed_remotes = Vec::new();
    let mut warnings = Vec::new();
    for remote in remotes {
        match backend.remove_remote(&remote.name) {
            Ok(()) => removed_remotes.push(remote),
            Err(err) => {
                let message = format!("could not remove remote '{}': {}", remote.name, err);
                ui.show_warning(&message);
                warnings.push(message);
            }
        }
    }

    Ok(FixReport {
        backup_path,
        rewritten: scan.mismatch_count,
        removed_remotes,
        warnings,
    })
}

/// [`RewriteBackend`] backed by `git` and `git filter-repo`
#[derive(Debug, Clone)]
pub struct GitRewriteBackend {
    git: Git,
    backup_root: PathBuf,
}

impl GitRewriteBackend {
    pub fn new(git: Git) -> Self {
        Self::with_backup_root(git, std::env::temp_dir())
    }

    pub fn with_backup_root(git: Git, backup_root: impl Into<PathBuf>) -> Self {
        Self {
            git,
            backup_root: backup_root.into(),
        }
    }
}

impl RewriteBackend for GitRewriteBackend {
    fn tool_available(&self) -> bool {
        self.git.filter_repo_available()
    }

    fn create_backup(&self) -> Result<PathBuf> {
        create_mirror_backup(&self.git, &self.backup_root)
    }

    fn remotes(&self) -> Result<Vec<Remote>> {
        self.git
            .remotes()?
            .into_iter()
            .map(|name| {
                let url = self.git.remote_url(&name)?;
                Ok(Remote { name, url })
            })
            .collect()
    }

    fn rewrite(&self, mailmap: &Path) -> Result<()> {
        let mailmap = mailmap.to_string_lossy().into_owned();
        let status = self
            .git
            .run_inherited(["filter-repo", "--mailmap", mailmap.as_str(), "--force"])?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::Git {
                command: format!("git filter-repo --mailmap {} --force", mailmap),
                stderr: format!("exited with {}", status),
            })
        }
    }

    fn remove_remote(&self, name: &str) -> Result<()> {
        self.git.remove_remote(name)
    }
}
