//! Sample identities and config files.

use anyhow::Result;
use gitid_types::{Identity, Rule};
use serde::Serialize;
use std::path::Path;

/// On-disk shape of the gitid config file
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigFile {
    pub identities: Vec<Identity>,
    pub rules: Vec<Rule>,
}

impl ConfigFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identity(mut self, identity: Identity) -> Self {
        self.identities.push(identity);
        self
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }
}

/// `work`: Alice Smith <alice@work.com>
pub fn work_identity() -> Identity {
    Identity::new("work", "Alice Smith", "alice@work.com")
}

/// `personal`: Alice <alice@home.net>
pub fn personal_identity() -> Identity {
    Identity::new("personal", "Alice", "alice@home.net")
}
