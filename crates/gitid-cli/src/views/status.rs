use super::Style;
use gitid_types::{Identity, Rule};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize)]
pub struct KeyCheck {
    pub value: String,
    pub present: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CandidateRow {
    pub index: usize,
    pub rule: Rule,
    pub score: i32,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub cwd: PathBuf,
    pub repository: Option<PathBuf>,
    pub remote_url: Option<String>,
    pub current_name: Option<String>,
    pub current_email: Option<String>,
    pub expected: Option<Identity>,
    pub matched_rule: Option<Rule>,
    pub score: Option<i32>,
    /// `None` when no rule applies
    pub email_matches: Option<bool>,
    pub ssh_key: Option<KeyCheck>,
    pub gpg_key: Option<KeyCheck>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub candidates: Vec<CandidateRow>,
}

pub struct StatusView<'a> {
    report: &'a StatusReport,
    style: Style,
}

impl<'a> StatusView<'a> {
    pub fn new(report: &'a StatusReport, style: Style) -> Self {
        Self { report, style }
    }

    fn render_key(&self, f: &mut fmt::Formatter, label: &str, key: &KeyCheck) -> fmt::Result {
        let state = if key.present {
            self.style.ok("found")
        } else {
            self.style.warn("missing")
        };
        writeln!(f, "{:<12}{} ({})", label, key.value, state)
    }

    fn render_candidates(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "Matching rules:")?;
        writeln!(
            f,
            "  {:<3} {:<10} {:<40} {:>5}  IDENTITY",
            "#", "TYPE", "PATTERN", "SCORE"
        )?;
        for candidate in &self.report.candidates {
            let marker = if candidate.selected { "*" } else { " " };
            writeln!(
                f,
                "{} {:<3} {:<10} {:<40} {:>5}  {}",
                marker,
                candidate.index + 1,
                candidate.rule.rule_type,
                candidate.rule.pattern,
                candidate.score,
                candidate.rule.identity
            )?;
        }
        Ok(())
    }
}

impl<'a> fmt::Display for StatusView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let r = self.report;

        writeln!(f, "{:<12}{}", "Directory:", r.cwd.display())?;
        match (&r.repository, &r.remote_url) {
            (Some(repo), Some(url)) => {
                writeln!(f, "{:<12}{} (origin: {})", "Repository:", repo.display(), url)?
            }
            (Some(repo), None) => writeln!(f, "{:<12}{}", "Repository:", repo.display())?,
            (None, _) => writeln!(f, "{:<12}{}", "Repository:", self.style.dim("(none)"))?,
        }

        let current = match (&r.current_name, &r.current_email) {
            (Some(name), Some(email)) => format!("{} <{}>", name, email),
            (None, Some(email)) => format!("<{}>", email),
            (Some(name), None) => format!("{} (no user.email)", name),
            (None, None) => self.style.dim("(not set)"),
        };
        writeln!(f, "{:<12}{}", "Current:", current)?;

        let Some(expected) = &r.expected else {
            writeln!(f, "{:<12}{}", "Expected:", self.style.dim("(no matching rule)"))?;
            if !r.candidates.is_empty() {
                self.render_candidates(f)?;
            }
            return Ok(());
        };

        writeln!(
            f,
            "{:<12}{} - {} <{}>",
            "Expected:", expected.name, expected.user_name, expected.email
        )?;
        if let (Some(rule), Some(score)) = (&r.matched_rule, r.score) {
            writeln!(f, "{:<12}{} (score {})", "Rule:", rule, score)?;
        }
        if let Some(key) = &r.ssh_key {
            self.render_key(f, "SSH key:", key)?;
        }
        if let Some(key) = &r.gpg_key {
            self.render_key(f, "GPG key:", key)?;
        }

        writeln!(f)?;
        if r.email_matches == Some(true) {
            writeln!(f, "{} identity matches", self.style.ok("✓"))?;
        } else {
            writeln!(
                f,
                "{} identity mismatch; run '{}' to apply '{}'",
                self.style.bad("✗"),
                self.style.accent("gitid use"),
                expected.name
            )?;
        }

        if !r.candidates.is_empty() {
            self.render_candidates(f)?;
        }
        Ok(())
    }
}

/// Outcome of `gitid use`
#[derive(Debug, Clone, Serialize)]
pub struct AppliedIdentity {
    pub identity: Identity,
    pub repository: PathBuf,
    pub warnings: Vec<String>,
}

pub struct AppliedView<'a> {
    applied: &'a AppliedIdentity,
    style: Style,
}

impl<'a> AppliedView<'a> {
    pub fn new(applied: &'a AppliedIdentity, style: Style) -> Self {
        Self { applied, style }
    }
}

impl<'a> fmt::Display for AppliedView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let identity = &self.applied.identity;
        writeln!(
            f,
            "{} Applied identity '{}' to {}",
            self.style.ok("✓"),
            identity.name,
            self.applied.repository.display()
        )?;
        writeln!(f, "  user.name       = {}", identity.user_name)?;
        writeln!(f, "  user.email      = {}", identity.email)?;
        if let Some(key) = &identity.gpg_key {
            writeln!(f, "  user.signingkey = {}", key)?;
        }
        for warning in &self.applied.warnings {
            writeln!(f, "{} {}", self.style.warn("Warning:"), warning)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> StatusReport {
        StatusReport {
            cwd: PathBuf::from("/home/alice/work/api"),
            repository: Some(PathBuf::from("/home/alice/work/api")),
            remote_url: Some("git@github.com:acme/api.git".to_string()),
            current_name: Some("Alice".to_string()),
            current_email: Some("alice@home.net".to_string()),
            expected: Some(Identity::new("work", "Alice Smith", "alice@work.com")),
            matched_rule: Some(Rule::directory("~/work/**", "work")),
            score: Some(23),
            email_matches: Some(false),
            ssh_key: Some(KeyCheck {
                value: "~/.ssh/id_work".to_string(),
                present: false,
            }),
            gpg_key: None,
            candidates: Vec::new(),
        }
    }

    #[test]
    fn test_mismatch_status() {
        let rendered = StatusView::new(&report(), Style::plain()).to_string();
        insta::assert_snapshot!(rendered, @r"
        Directory:  /home/alice/work/api
        Repository: /home/alice/work/api (origin: git@github.com:acme/api.git)
        Current:    Alice <alice@home.net>
        Expected:   work - Alice Smith <alice@work.com>
        Rule:       directory ~/work/** -> work (score 23)
        SSH key:    ~/.ssh/id_work (missing)

        ✗ identity mismatch; run 'gitid use' to apply 'work'
        ");
    }

    #[test]
    fn test_verbose_marks_selected_candidate() {
        let mut report = report();
        report.candidates = vec![
            CandidateRow {
                index: 0,
                rule: Rule::directory("~/work/**", "work"),
                score: 23,
                selected: true,
            },
            CandidateRow {
                index: 1,
                rule: Rule::directory("~/**", "personal"),
                score: 13,
                selected: false,
            },
        ];

        let rendered = StatusView::new(&report, Style::plain()).to_string();
        assert!(rendered.contains("* 1   directory  ~/work/**"));
        assert!(rendered.contains("  2   directory  ~/**"));
    }

    #[test]
    fn test_no_rule_status() {
        let mut report = report();
        report.expected = None;
        report.matched_rule = None;
        report.score = None;
        report.email_matches = None;
        report.ssh_key = None;

        let rendered = StatusView::new(&report, Style::plain()).to_string();
        assert!(rendered.contains("Expected:   (no matching rule)"));
        assert!(!rendered.contains("mismatch"));
    }
}
