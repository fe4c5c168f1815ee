use crate::commit_log::{CommitLimit, read_commits};
use crate::config::RuleStore;
use crate::expected::resolve_expected;
use crate::git::Git;
use crate::push_state::PushState;
use crate::Result;
use gitid_types::{AuditResult, ScanResult};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct AuditOptions {
    /// `0` for the default cap of 1000 commits, negative for no cap
    pub limit: i64,
    /// Report matching commits too, not just mismatches
    pub show_all: bool,
}

/// Audit the history of `git` against the identity expected for `cwd`.
///
/// Returns [`ScanResult::no_match`] when no rule applies to this context.
pub fn scan(
    store: &dyn RuleStore,
    git: &Git,
    cwd: &Path,
    options: &AuditOptions,
) -> Result<ScanResult> {
    let remote_url = git.origin_url()?;
    let Some(expected) = resolve_expected(store, cwd, remote_url.as_deref())? else {
        tracing::info!(cwd = %cwd.display(), "no rule matches; nothing to audit against");
        return Ok(ScanResult::no_match());
    };

    let commits = read_commits(git, CommitLimit::from_requested(options.limit))?;
    let push_state = PushState::detect(git)?;
    let expected_email = expected.identity.email.clone();

    let mut result = ScanResult {
        expected_identity: Some(expected.identity.name.clone()),
        expected_email: Some(expected_email.clone()),
        matched_rule: Some(expected.rule),
        no_upstream: push_state.is_upstream_unknown(),
        ..ScanResult::default()
    };

    for commit in commits {
        let is_pushed = push_state.is_pushed(&commit.hash);
        let is_mismatched = !expected.identity.email_matches(&commit.author_email);

        result.total_scanned += 1;
        if is_mismatched {
            result.mismatch_count += 1;
        }
        if is_pushed {
            result.pushed_count += 1;
        } else {
            result.local_only_count += 1;
        }

        if is_mismatched || options.show_all {
            result.results.push(AuditResult {
                commit,
                expected_email: expected_email.clone(),
                is_mismatched,
                is_pushed,
            });
        }
    }

    tracing::info!(
        scanned = result.total_scanned,
        mismatches = result.mismatch_count,
        no_upstream = result.no_upstream,
        "audit scan complete"
    );
    Ok(result)
}
