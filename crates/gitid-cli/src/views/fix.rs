use super::Style;
use gitid_runtime::{FixReport, FixSummary};
use std::fmt;

pub struct FixSummaryView<'a> {
    summary: &'a FixSummary,
    style: Style,
}

impl<'a> FixSummaryView<'a> {
    pub fn new(summary: &'a FixSummary, style: Style) -> Self {
        Self { summary, style }
    }
}

impl<'a> fmt::Display for FixSummaryView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = self.summary;
        writeln!(
            f,
            "{} mismatched commit(s) will be rewritten to <{}>:",
            s.mismatches, s.expected_email
        )?;
        writeln!(f, "  local-only: {}", s.local_only)?;
        writeln!(f, "  pushed:     {}", s.pushed)?;
        writeln!(f, "Emails to replace:")?;
        for email in &s.wrong_emails {
            writeln!(f, "  {} -> {}", email, s.expected_email)?;
        }
        if s.pushed > 0 {
            writeln!(f)?;
            writeln!(
                f,
                "{}",
                self.style.warn(
                    "Pushed commits will diverge from the remote and need a force push. \
                     Collaborators must re-clone or rebase."
                )
            )?;
        }
        Ok(())
    }
}

pub struct FixReportView<'a> {
    report: &'a FixReport,
    style: Style,
}

impl<'a> FixReportView<'a> {
    pub fn new(report: &'a FixReport, style: Style) -> Self {
        Self { report, style }
    }
}

impl<'a> fmt::Display for FixReportView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let r = self.report;
        writeln!(
            f,
            "{} Rewrote {} commit(s).",
            self.style.ok("✓"),
            r.rewritten
        )?;
        writeln!(f, "Backup: {}", r.backup_path.display())?;

        for warning in &r.warnings {
            writeln!(f, "{} {}", self.style.warn("Warning:"), warning)?;
        }

        if r.removed_remotes.is_empty() {
            return Ok(());
        }

        writeln!(f)?;
        writeln!(
            f,
            "Remotes were removed so the old history cannot be pushed by accident. To publish:"
        )?;
        for remote in &r.removed_remotes {
            match &remote.url {
                Some(url) => writeln!(
                    f,
                    "  {}",
                    self.style
                        .accent(&format!("git remote add {} {}", remote.name, url))
                )?,
                None => writeln!(
                    f,
                    "  git remote add {} <url>   (no URL was recorded)",
                    remote.name
                )?,
            }
            writeln!(
                f,
                "  {}",
                self.style.accent(&format!("git fetch {}", remote.name))
            )?;
            writeln!(
                f,
                "  {}",
                self.style.accent(&format!(
                    "git push --force-with-lease {} --all",
                    remote.name
                ))
            )?;
        }
        Ok(())
    }
}
