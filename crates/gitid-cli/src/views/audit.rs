use super::{Style, truncate};
use gitid_types::{AuditResult, ScanResult};
use std::fmt;

const AUTHOR_WIDTH: usize = 32;
const SUBJECT_WIDTH: usize = 50;

pub struct AuditView<'a> {
    scan: &'a ScanResult,
    style: Style,
}

impl<'a> AuditView<'a> {
    pub fn new(scan: &'a ScanResult, style: Style) -> Self {
        Self { scan, style }
    }

    fn render_row(&self, f: &mut fmt::Formatter, result: &AuditResult) -> fmt::Result {
        let status = if result.is_mismatched {
            self.style.bad(&format!("{:<9}", "MISMATCH"))
        } else {
            self.style.ok(&format!("{:<9}", "ok"))
        };
        let author = format!(
            "{} <{}>",
            result.commit.author_name, result.commit.author_email
        );

        writeln!(
            f,
            "{} {:<8} {:<width$} {:<16} {}",
            status,
            result.commit.short_hash(),
            truncate(&author, AUTHOR_WIDTH),
            result.commit.date.format("%Y-%m-%d %H:%M"),
            truncate(&result.commit.subject, SUBJECT_WIDTH),
            width = AUTHOR_WIDTH
        )
    }
}

impl<'a> fmt::Display for AuditView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let scan = self.scan;
        let (Some(identity), Some(email)) = (&scan.expected_identity, &scan.expected_email) else {
            return writeln!(
                f,
                "No rule matches this directory; nothing to audit against."
            );
        };

        writeln!(f, "Expected identity: {} <{}>", identity, email)?;
        if let Some(rule) = &scan.matched_rule {
            writeln!(f, "Matched rule:      {}", self.style.dim(&rule.to_string()))?;
        }
        writeln!(f)?;

        if scan.total_scanned == 0 {
            return writeln!(f, "No commits to audit.");
        }

        if !scan.results.is_empty() {
            writeln!(
                f,
                "{:<9} {:<8} {:<width$} {:<16} SUBJECT",
                "STATUS",
                "HASH",
                "AUTHOR",
                "DATE",
                width = AUTHOR_WIDTH
            )?;
            writeln!(f, "{}", "-".repeat(120))?;
            for result in &scan.results {
                self.render_row(f, result)?;
            }
            writeln!(f)?;
        }

        if scan.mismatch_count == 0 {
            writeln!(
                f,
                "{} all {} scanned commits use {}",
                self.style.ok("✓"),
                scan.total_scanned,
                email
            )?;
        } else {
            let (local, pushed) = scan.mismatch_split();
            writeln!(
                f,
                "{} {} of {} scanned commits use the wrong email ({} local-only, {} pushed)",
                self.style.bad("✗"),
                scan.mismatch_count,
                scan.total_scanned,
                local,
                pushed
            )?;
        }
        writeln!(
            f,
            "Scanned: {} local-only, {} pushed",
            scan.local_only_count, scan.pushed_count
        )?;

        if scan.no_upstream {
            writeln!(
                f,
                "{}",
                self.style.warn(
                    "Upstream unknown: no tracking branch, so every commit is counted as pushed."
                )
            )?;
        }

        if scan.mismatch_count > 0 {
            writeln!(f)?;
            writeln!(
                f,
                "Run {} to rewrite these commits.",
                self.style.accent("gitid audit --fix")
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use gitid_types::{Commit, Rule};

    fn result(hash: &str, email: &str, subject: &str, mismatched: bool, pushed: bool) -> AuditResult {
        AuditResult {
            commit: Commit {
                hash: hash.to_string(),
                author_name: "Alice".to_string(),
                author_email: email.to_string(),
                date: DateTime::parse_from_rfc3339("2024-03-01T10:15:00+01:00").unwrap(),
                subject: subject.to_string(),
            },
            expected_email: "alice@work.com".to_string(),
            is_mismatched: mismatched,
            is_pushed: pushed,
        }
    }

    #[test]
    fn test_mismatch_report() {
        let scan = ScanResult {
            results: vec![
                result("c3c3c3c3c3", "alice@home.net", "Fix typo", true, false),
                result("b2b2b2b2b2", "alice@home.net", "Add endpoint", true, false),
            ],
            expected_identity: Some("work".to_string()),
            expected_email: Some("alice@work.com".to_string()),
            matched_rule: Some(Rule::directory("~/work/**", "work")),
            total_scanned: 3,
            mismatch_count: 2,
            local_only_count: 2,
            pushed_count: 1,
            no_upstream: false,
        };

        let rendered = AuditView::new(&scan, Style::plain()).to_string();
        insta::assert_snapshot!(rendered, @r"
        Expected identity: work <alice@work.com>
        Matched rule:      directory ~/work/** -> work

        STATUS    HASH     AUTHOR                           DATE             SUBJECT
        ------------------------------------------------------------------------------------------------------------------------
        MISMATCH  c3c3c3c  Alice <alice@home.net>           2024-03-01 10:15 Fix typo
        MISMATCH  b2b2b2b  Alice <alice@home.net>           2024-03-01 10:15 Add endpoint

        ✗ 2 of 3 scanned commits use the wrong email (2 local-only, 0 pushed)
        Scanned: 2 local-only, 1 pushed

        Run gitid audit --fix to rewrite these commits.
        ");
    }

    #[test]
    fn test_no_match_report() {
        let rendered = AuditView::new(&ScanResult::no_match(), Style::plain()).to_string();
        assert_eq!(
            rendered,
            "No rule matches this directory; nothing to audit against.\n"
        );
    }

    #[test]
    fn test_clean_history_without_upstream() {
        let scan = ScanResult {
            expected_identity: Some("work".to_string()),
            expected_email: Some("alice@work.com".to_string()),
            total_scanned: 4,
            pushed_count: 4,
            no_upstream: true,
            ..ScanResult::default()
        };

        let rendered = AuditView::new(&scan, Style::plain()).to_string();
        assert!(rendered.contains("all 4 scanned commits use alice@work.com"));
        assert!(rendered.contains("Upstream unknown"));
        assert!(!rendered.contains("STATUS"));
    }
}
