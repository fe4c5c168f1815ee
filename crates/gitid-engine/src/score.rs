use crate::matcher::{expand_directory_pattern, normalize_remote_pattern};
use gitid_types::{Rule, RuleType};

/// Exact remote patterns outrank any wildcard pattern of the same depth
const EXACT_REMOTE_BONUS: i32 = 50;
const SEGMENT_WEIGHT: i32 = 10;
const STAR_PENALTY: i32 = 2;
const GLOBSTAR_PENALTY: i32 = 3;

/// Deterministic specificity score used only to break ties between
/// matching rules; higher is more specific.
///
/// Directory: segments of the tilde-expanded pattern × 10, −2 per `*`
/// character, −3 more per `**`.
/// Remote: `/`-separated parts × 10, +50 without any `*`, otherwise −2 per `*`.
pub fn specificity(rule: &Rule) -> i32 {
    match rule.rule_type {
        RuleType::Directory => directory_specificity(&rule.pattern),
        RuleType::Remote => remote_specificity(&rule.pattern),
    }
}

fn directory_specificity(pattern: &str) -> i32 {
    let expanded = expand_directory_pattern(pattern);
    let segments = expanded.split('/').filter(|s| !s.is_empty()).count() as i32;
    let stars = expanded.matches('*').count() as i32;
    let globstars = expanded.matches("**").count() as i32;

    segments * SEGMENT_WEIGHT - stars * STAR_PENALTY - globstars * GLOBSTAR_PENALTY
}

fn remote_specificity(pattern: &str) -> i32 {
    let normalized = normalize_remote_pattern(pattern);
    let parts = normalized.split('/').count() as i32;
    let stars = normalized.matches('*').count() as i32;

    let base = parts * SEGMENT_WEIGHT;
    if stars == 0 {
        base + EXACT_REMOTE_BONUS
    } else {
        base - stars * STAR_PENALTY
    }
}
