use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::Rule;

/// Immutable snapshot of one parsed `git log` record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub hash: String,
    pub author_name: String,
    pub author_email: String,
    pub date: DateTime<FixedOffset>,
    pub subject: String,
}

impl Commit {
    pub fn short_hash(&self) -> &str {
        let end = self
            .hash
            .char_indices()
            .nth(7)
            .map(|(i, _)| i)
            .unwrap_or(self.hash.len());
        &self.hash[..end]
    }
}

/// Classification of a single commit against the expected identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditResult {
    pub commit: Commit,
    pub expected_email: String,
    pub is_mismatched: bool,
    pub is_pushed: bool,
}

/// Outcome of one audit scan.
///
/// `results` is ordered most-recent-first and only contains mismatched
/// commits unless the scan was asked to show all of them. The counters
/// always cover every scanned commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    pub results: Vec<AuditResult>,
    pub expected_identity: Option<String>,
    pub expected_email: Option<String>,
    pub matched_rule: Option<Rule>,
    pub total_scanned: usize,
    pub mismatch_count: usize,
    pub local_only_count: usize,
    pub pushed_count: usize,
    /// No upstream tracking ref: every commit was conservatively counted as pushed
    pub no_upstream: bool,
}

impl ScanResult {
    /// Explicit "nothing to audit against" result for a context no rule matches
    pub fn no_match() -> Self {
        Self::default()
    }

    pub fn has_expected_identity(&self) -> bool {
        self.matched_rule.is_some()
    }

    pub fn mismatches(&self) -> impl Iterator<Item = &AuditResult> {
        self.results.iter().filter(|r| r.is_mismatched)
    }

    /// `(local_only, pushed)` split over mismatched commits only
    pub fn mismatch_split(&self) -> (usize, usize) {
        self.mismatches().fold((0, 0), |(local, pushed), r| {
            if r.is_pushed {
                (local, pushed + 1)
            } else {
                (local + 1, pushed)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(hash: &str, mismatched: bool, pushed: bool) -> AuditResult {
        AuditResult {
            commit: Commit {
                hash: hash.to_string(),
                author_name: "Alice".to_string(),
                author_email: "alice@home.net".to_string(),
                date: DateTime::parse_from_rfc3339("2024-03-01T10:00:00+01:00").unwrap(),
                subject: "subject".to_string(),
            },
            expected_email: "alice@work.com".to_string(),
            is_mismatched: mismatched,
            is_pushed: pushed,
        }
    }

    #[test]
    fn test_short_hash() {
        let r = result("0123456789abcdef", true, false);
        assert_eq!(r.commit.short_hash(), "0123456");

        let r = result("abc", true, false);
        assert_eq!(r.commit.short_hash(), "abc");
    }

    #[test]
    fn test_mismatch_split_ignores_matching_commits() {
        let scan = ScanResult {
            results: vec![
                result("a", true, false),
                result("b", true, true),
                result("c", false, true),
                result("d", true, false),
            ],
            ..ScanResult::default()
        };
        assert_eq!(scan.mismatch_split(), (2, 1));
    }

    #[test]
    fn test_no_match_is_empty() {
        let scan = ScanResult::no_match();
        assert!(!scan.has_expected_identity());
        assert_eq!(scan.total_scanned, 0);
        assert!(scan.results.is_empty());
    }
}
