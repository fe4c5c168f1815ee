use crate::matcher::{expand_directory_pattern, has_wildcard, normalize_remote_pattern};
use crate::{Error, Result};
use gitid_types::{Rule, RuleType};
use globset::GlobBuilder;

/// Check a rule's pattern invariants: non-empty, a valid glob for directory
/// rules, and at least `host/segment` for remote rules.
pub fn validate_rule(rule: &Rule) -> Result<()> {
    let pattern = rule.pattern.trim();
    let invalid = |reason: &str| Error::InvalidRule {
        pattern: rule.pattern.clone(),
        reason: reason.to_string(),
    };

    if pattern.is_empty() {
        return Err(invalid("pattern is empty"));
    }
    if rule.identity.trim().is_empty() {
        return Err(invalid("rule does not reference an identity"));
    }

    let glob = match rule.rule_type {
        RuleType::Directory => expand_directory_pattern(pattern),
        RuleType::Remote => {
            let normalized = normalize_remote_pattern(pattern);
            let parts = normalized.split('/').filter(|s| !s.is_empty()).count();
            if parts < 2 {
                return Err(invalid(
                    "remote patterns need a host and at least one path segment (host/org[/repo])",
                ));
            }
            if normalized.contains("//") {
                return Err(invalid("remote pattern contains an empty path segment"));
            }
            normalized
        }
    };

    if has_wildcard(&glob) {
        GlobBuilder::new(&glob)
            .literal_separator(true)
            .build()
            .map_err(|e| invalid(&e.to_string()))?;
    }

    Ok(())
}
