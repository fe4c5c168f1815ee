use chrono::DateTime;
use gitid_runtime::{
    CONFIRMATION_PHRASE, Error, FixInteraction, FixOptions, FixStep, FixSummary, Remote,
    Result, RewriteBackend, fix,
};
use gitid_types::{AuditResult, Commit, ScanResult};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[derive(Default)]
struct FakeBackend {
    tool_missing: bool,
    fail_rewrite: bool,
    stuck_remote: Option<String>,
    backup_root: PathBuf,
    calls: RefCell<Vec<String>>,
    mailmap_seen: RefCell<Option<(PathBuf, String)>>,
}

impl FakeBackend {
    fn new(backup_root: &Path) -> Self {
        Self {
            backup_root: backup_root.to_path_buf(),
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl RewriteBackend for FakeBackend {
    fn tool_available(&self) -> bool {
        !self.tool_missing
    }

    fn create_backup(&self) -> Result<PathBuf> {
        self.calls.borrow_mut().push("backup".to_string());
        let path = self.backup_root.join("api-backup-20240301-101500");
        std::fs::create_dir_all(&path)?;
        Ok(path)
    }

    fn remotes(&self) -> Result<Vec<Remote>> {
        Ok(vec![
            Remote {
                name: "origin".to_string(),
                url: Some("git@github.com:acme/api.git".to_string()),
            },
            Remote {
                name: "upstream".to_string(),
                url: None,
            },
        ])
    }

    fn rewrite(&self, mailmap: &Path) -> Result<()> {
        self.calls.borrow_mut().push("rewrite".to_string());
        let contents = std::fs::read_to_string(mailmap)?;
        *self.mailmap_seen.borrow_mut() = Some((mailmap.to_path_buf(), contents));
        if self.fail_rewrite {
            return Err(Error::Git {
                command: "git filter-repo".to_string(),
                stderr: "boom".to_string(),
            });
        }
        Ok(())
    }

    fn remove_remote(&self, name: &str) -> Result<()> {
        self.calls.borrow_mut().push(format!("remove {}", name));
        if self.stuck_remote.as_deref() == Some(name) {
            return Err(Error::Git {
                command: format!("git remote remove {}", name),
                stderr: "permission denied".to_string(),
            });
        }
        Ok(())
    }
}

struct ScriptedOperator {
    reply: String,
    summary: Option<FixSummary>,
    signature_warned: bool,
    prompted: bool,
    steps: Vec<FixStep>,
    warnings: Vec<String>,
}

impl ScriptedOperator {
    fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            summary: None,
            signature_warned: false,
            prompted: false,
            steps: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

impl FixInteraction for ScriptedOperator {
    fn show_summary(&mut self, summary: &FixSummary) {
        self.summary = Some(summary.clone());
    }

    fn show_signature_warning(&mut self) {
        self.signature_warned = true;
    }

    fn prompt_confirmation(&mut self, _phrase: &str) -> Result<String> {
        self.prompted = true;
        Ok(self.reply.clone())
    }

    fn show_progress(&mut self, step: &FixStep) {
        self.steps.push(step.clone());
    }

    fn show_warning(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }
}

fn audit_result(hash: &str, email: &str, pushed: bool) -> AuditResult {
    AuditResult {
        commit: Commit {
            hash: hash.to_string(),
            author_name: "Alice".to_string(),
            author_email: email.to_string(),
            date: DateTime::parse_from_rfc3339("2024-03-01T10:15:00+01:00").unwrap(),
            subject: format!("commit {}", hash),
        },
        expected_email: "alice@work.com".to_string(),
        is_mismatched: true,
        is_pushed: pushed,
    }
}

fn scan_with_mismatches() -> ScanResult {
    ScanResult {
        results: vec![
            audit_result("c3", "alice@home.net", false),
            audit_result("c2", "old@corp.com", false),
            audit_result("c1", "alice@home.net", true),
        ],
        expected_identity: Some("work".to_string()),
        expected_email: Some("alice@work.com".to_string()),
        total_scanned: 4,
        mismatch_count: 3,
        local_only_count: 2,
        pushed_count: 2,
        ..ScanResult::default()
    }
}

fn options(scratch: &Path) -> FixOptions {
    FixOptions {
        scratch_dir: scratch.to_path_buf(),
        ..FixOptions::default()
    }
}

fn is_empty_dir(dir: &Path) -> bool {
    std::fs::read_dir(dir).unwrap().next().is_none()
}

#[test]
fn test_nothing_to_fix_has_no_side_effects() {
    let scratch = TempDir::new().unwrap();
    let backups = TempDir::new().unwrap();
    let backend = FakeBackend::new(backups.path());
    let mut ui = ScriptedOperator::replying(CONFIRMATION_PHRASE);

    let scan = ScanResult {
        expected_email: Some("alice@work.com".to_string()),
        total_scanned: 5,
        ..ScanResult::default()
    };
    let err = fix(&scan, &backend, &mut ui, &options(scratch.path())).unwrap_err();

    assert!(matches!(err, Error::NothingToFix));
    assert!(!ui.prompted);
    assert!(backend.calls().is_empty());
    assert!(is_empty_dir(scratch.path()));
    assert!(is_empty_dir(backups.path()));
}

#[test]
fn test_mistyped_phrase_aborts_before_backup() {
    let scratch = TempDir::new().unwrap();
    let backups = TempDir::new().unwrap();
    let backend = FakeBackend::new(backups.path());
    let mut ui = ScriptedOperator::replying("Rewrite History");

    let err = fix(
        &scan_with_mismatches(),
        &backend,
        &mut ui,
        &options(scratch.path()),
    )
    .unwrap_err();

    assert!(matches!(err, Error::Aborted));
    assert!(ui.signature_warned);
    assert!(ui.steps.is_empty());
    assert!(backend.calls().is_empty());
    assert!(is_empty_dir(scratch.path()));
    assert!(is_empty_dir(backups.path()));
}

#[test]
fn test_missing_tool_fails_before_anything_else() {
    let scratch = TempDir::new().unwrap();
    let backups = TempDir::new().unwrap();
    let backend = FakeBackend {
        tool_missing: true,
        ..FakeBackend::new(backups.path())
    };
    let mut ui = ScriptedOperator::replying(CONFIRMATION_PHRASE);

    let err = fix(
        &scan_with_mismatches(),
        &backend,
        &mut ui,
        &options(scratch.path()),
    )
    .unwrap_err();

    assert!(matches!(err, Error::ToolUnavailable));
    assert!(ui.summary.is_none());
    assert!(!ui.prompted);
    assert!(backend.calls().is_empty());
    assert!(is_empty_dir(scratch.path()));
    assert!(is_empty_dir(backups.path()));
}

#[test]
fn test_successful_fix_runs_steps_in_order() {
    let scratch = TempDir::new().unwrap();
    let backups = TempDir::new().unwrap();
    let backend = FakeBackend::new(backups.path());
    // surrounding whitespace is trimmed
    let mut ui = ScriptedOperator::replying(&format!("  {}\n", CONFIRMATION_PHRASE));

    let report = fix(
        &scan_with_mismatches(),
        &backend,
        &mut ui,
        &options(scratch.path()),
    )
    .unwrap();

    assert_eq!(
        backend.calls(),
        vec!["backup", "rewrite", "remove origin", "remove upstream"]
    );

    let summary = ui.summary.clone().unwrap();
    assert_eq!(summary.mismatches, 3);
    assert_eq!((summary.local_only, summary.pushed), (2, 1));
    assert_eq!(summary.wrong_emails, vec!["alice@home.net", "old@corp.com"]);

    let (mailmap_path, contents) = backend.mailmap_seen.borrow().clone().unwrap();
    assert_eq!(
        contents,
        "<alice@work.com> <alice@home.net>\n<alice@work.com> <old@corp.com>\n"
    );
    assert!(mailmap_path.starts_with(scratch.path()));
    assert!(!mailmap_path.exists());

    assert_eq!(
        report.backup_path,
        backups.path().join("api-backup-20240301-101500")
    );
    assert_eq!(report.rewritten, 3);
    assert_eq!(report.removed_remotes.len(), 2);
    assert!(report.warnings.is_empty());
    assert_eq!(
        ui.steps.first(),
        Some(&FixStep::CreatingBackup)
    );
    assert!(ui.steps.contains(&FixStep::Rewriting { entries: 2 }));
}

#[test]
fn test_rewrite_failure_reports_backup_and_cleans_mailmap() {
    let scratch = TempDir::new().unwrap();
    let backups = TempDir::new().unwrap();
    let backend = FakeBackend {
        fail_rewrite: true,
        ..FakeBackend::new(backups.path())
    };
    let mut ui = ScriptedOperator::replying(CONFIRMATION_PHRASE);

    let err = fix(
        &scan_with_mismatches(),
        &backend,
        &mut ui,
        &options(scratch.path()),
    )
    .unwrap_err();

    let backup = backups.path().join("api-backup-20240301-101500");
    match &err {
        Error::RewriteFailed { backup: path, .. } => assert_eq!(path, &backup),
        other => panic!("unexpected error: {}", other),
    }
    assert!(err.to_string().contains(&backup.display().to_string()));
    assert_eq!(backend.calls(), vec!["backup", "rewrite"]);
    assert!(is_empty_dir(scratch.path()));
}

#[test]
fn test_remote_removal_failure_is_a_warning() {
    let scratch = TempDir::new().unwrap();
    let backups = TempDir::new().unwrap();
    let backend = FakeBackend {
        stuck_remote: Some("origin".to_string()),
        ..FakeBackend::new(backups.path())
    };
    let mut ui = ScriptedOperator::replying(CONFIRMATION_PHRASE);

    let report = fix(
        &scan_with_mismatches(),
        &backend,
        &mut ui,
        &options(scratch.path()),
    )
    .unwrap();

    assert_eq!(report.removed_remotes.len(), 1);
    assert_eq!(report.removed_remotes[0].name, "upstream");
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("origin"));
    assert_eq!(ui.warnings, report.warnings);
}
