use crate::{Error, Result};
use gitid_engine::validate_rule;
use gitid_types::{Identity, Rule};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Read-only source of rules and identities.
///
/// Rules are returned in configuration order; that order is the tie-break
/// for equally specific rules.
pub trait RuleStore {
    fn list_rules(&self) -> Result<Vec<Rule>>;
    fn get_identity(&self, name: &str) -> Result<Option<Identity>>;
}

/// TOML-backed rule/identity store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub identities: Vec<Identity>,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl Config {
    /// Load and validate the config at `path`. A missing file is an empty config.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config not found, using empty config");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Every rule pattern must be valid and identity names must be unique
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for identity in &self.identities {
            if identity.name.trim().is_empty() {
                return Err(Error::Config("identity with an empty name".to_string()));
            }
            if !seen.insert(identity.name.as_str()) {
                return Err(Error::Config(format!(
                    "identity '{}' is defined more than once",
                    identity.name
                )));
            }
        }

        for rule in &self.rules {
            validate_rule(rule)?;
        }

        Ok(())
    }

    pub fn identity(&self, name: &str) -> Option<&Identity> {
        self.identities.iter().find(|i| i.name == name)
    }
}

impl RuleStore for Config {
    fn list_rules(&self) -> Result<Vec<Rule>> {
        Ok(self.rules.clone())
    }

    fn get_identity(&self, name: &str) -> Result<Option<Identity>> {
        Ok(self.identity(name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitid_types::RuleType;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
[[identities]]
name = "work"
user_name = "Alice"
email = "alice@work.com"
ssh_key = "~/.ssh/id_work"

[[identities]]
name = "personal"
user_name = "Alice"
email = "alice@home.net"

[[rules]]
type = "directory"
pattern = "~/work/**"
identity = "work"

[[rules]]
type = "remote"
pattern = "github.com/alice"
identity = "personal"
"#;

    #[test]
    fn test_load_nonexistent_returns_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config = Config::load_from(&temp_dir.path().join("missing.toml"))?;
        assert!(config.rules.is_empty());
        assert!(config.identities.is_empty());
        Ok(())
    }

    #[test]
    fn test_load_preserves_rule_order() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, SAMPLE)?;

        let config = Config::load_from(&path)?;
        let rules = config.list_rules()?;
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].rule_type, RuleType::Directory);
        assert_eq!(rules[1].rule_type, RuleType::Remote);

        let work = config.get_identity("work")?.unwrap();
        assert_eq!(work.email, "alice@work.com");
        assert_eq!(work.ssh_key.as_deref(), Some("~/.ssh/id_work"));
        assert!(config.get_identity("nobody")?.is_none());
        Ok(())
    }

    #[test]
    fn test_invalid_rule_is_config_error() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[[rules]]\ntype = \"remote\"\npattern = \"github.com\"\nidentity = \"work\"\n",
        )?;

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::Engine(_)));
        Ok(())
    }

    #[test]
    fn test_duplicate_identity_rejected() {
        let config = Config {
            identities: vec![
                Identity::new("work", "Alice", "alice@work.com"),
                Identity::new("work", "Alice", "alice@corp.com"),
            ],
            rules: vec![],
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[[rules]\n")?;

        assert!(matches!(
            Config::load_from(&path).unwrap_err(),
            Error::ConfigParse(_)
        ));
        Ok(())
    }
}
