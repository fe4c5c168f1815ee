use gitid_core::{expand_tilde, normalize_path};
use gitid_types::{ParsedRemote, Rule, RuleType};
use globset::GlobBuilder;
use std::path::Path;

const GLOB_META: &[char] = &['*', '?', '[', '{'];

pub(crate) fn has_wildcard(s: &str) -> bool {
    s.contains(GLOB_META)
}

/// Tilde-expanded directory pattern without a trailing separator
pub(crate) fn expand_directory_pattern(pattern: &str) -> String {
    let expanded = expand_tilde(pattern.trim()).to_string_lossy().into_owned();
    if expanded.len() > 1 {
        expanded.trim_end_matches('/').to_string()
    } else {
        expanded
    }
}

/// Lower-cased `host[/org[/repo]]` pattern without surrounding separators
pub(crate) fn normalize_remote_pattern(pattern: &str) -> String {
    pattern.trim().trim_matches('/').to_ascii_lowercase()
}

/// Does a directory rule's pattern match the given working directory?
///
/// `*` matches within one path segment, `**` spans zero or more segments.
/// The literal prefix of the pattern is canonicalized the same way the target
/// is, so symlinked parents (e.g. `/var` -> `/private/var`) still match.
/// A trailing `/**` also matches the base directory itself.
pub fn directory_matches(pattern: &str, cwd: &Path) -> bool {
    let expanded = expand_directory_pattern(pattern);
    if expanded.is_empty() {
        return false;
    }
    let pattern = canonicalize_literal_prefix(&expanded);
    let target = normalize_path(cwd);
    let target = target.to_string_lossy();

    if glob_matches(&pattern, &target, false) {
        return true;
    }

    match pattern.strip_suffix("/**") {
        Some(base) if !base.is_empty() => {
            if has_wildcard(base) {
                glob_matches(base, &target, false)
            } else {
                base == target
            }
        }
        _ => false,
    }
}

/// Does a remote rule's pattern match the parsed remote?
///
/// Case-insensitive. With wildcards the pattern is globbed against
/// `host/org/repo`; without, it must equal it or be a prefix ending on a
/// path boundary.
pub fn remote_matches(pattern: &str, remote: &ParsedRemote) -> bool {
    let pattern = normalize_remote_pattern(pattern);
    if pattern.is_empty() {
        return false;
    }
    let target = remote.to_string().to_ascii_lowercase();

    if has_wildcard(&pattern) {
        return glob_matches(&pattern, &target, true);
    }

    target == pattern
        || target
            .strip_prefix(pattern.as_str())
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Match a rule against a context. Remote rules never match without a remote.
pub fn rule_matches(rule: &Rule, cwd: &Path, remote: Option<&ParsedRemote>) -> bool {
    match rule.rule_type {
        RuleType::Directory => directory_matches(&rule.pattern, cwd),
        RuleType::Remote => remote.is_some_and(|r| remote_matches(&rule.pattern, r)),
    }
}

fn glob_matches(pattern: &str, candidate: &str, case_insensitive: bool) -> bool {
    match GlobBuilder::new(pattern)
        .literal_separator(true)
        .case_insensitive(case_insensitive)
        .build()
    {
        Ok(glob) => glob.compile_matcher().is_match(candidate),
        Err(err) => {
            tracing::debug!(pattern, error = %err, "skipping invalid glob");
            false
        }
    }
}

/// Replace the wildcard-free leading segments of an absolute pattern with
/// their canonical form, when that directory exists.
fn canonicalize_literal_prefix(pattern: &str) -> String {
    if !pattern.starts_with('/') {
        return pattern.to_string();
    }

    let segments: Vec<&str> = pattern.split('/').collect();
    let split = segments
        .iter()
        .position(|s| has_wildcard(s))
        .unwrap_or(segments.len());

    let prefix = segments[..split].join("/");
    if prefix.is_empty() {
        return pattern.to_string();
    }

    let Ok(canonical) = Path::new(&prefix).canonicalize() else {
        return pattern.to_string();
    };

    let mut out = canonical.to_string_lossy().into_owned();
    for segment in &segments[split..] {
        if !out.ends_with('/') {
            out.push('/');
        }
        out.push_str(segment);
    }
    out
}
