use serde::{Deserialize, Serialize};
use std::fmt;

/// What a rule's pattern is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleType {
    /// Glob over the canonical working directory
    Directory,
    /// `host[/org[/repo]]` pattern over the parsed `origin` remote
    Remote,
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuleType::Directory => "directory",
            RuleType::Remote => "remote",
        };
        f.pad(name)
    }
}

/// Pattern-to-identity mapping used for context-based resolution.
///
/// Rules are owned by the configuration store and are read-only to the
/// resolver and scanner. `identity` references an [`crate::Identity`] by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(rename = "type")]
    pub rule_type: RuleType,
    pub pattern: String,
    pub identity: String,
}

impl Rule {
    pub fn directory(pattern: impl Into<String>, identity: impl Into<String>) -> Self {
        Self {
            rule_type: RuleType::Directory,
            pattern: pattern.into(),
            identity: identity.into(),
        }
    }

    pub fn remote(pattern: impl Into<String>, identity: impl Into<String>) -> Self {
        Self {
            rule_type: RuleType::Remote,
            pattern: pattern.into(),
            identity: identity.into(),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.rule_type, self.pattern, self.identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_type_serializes_lowercase() {
        let rule = Rule::remote("github.com/acme", "work");
        let json = serde_json::to_string(&rule).unwrap();
        assert_eq!(
            json,
            r#"{"type":"remote","pattern":"github.com/acme","identity":"work"}"#
        );
    }

    #[test]
    fn test_rule_display() {
        let rule = Rule::directory("~/work/**", "work");
        assert_eq!(rule.to_string(), "directory ~/work/** -> work");
    }
}
