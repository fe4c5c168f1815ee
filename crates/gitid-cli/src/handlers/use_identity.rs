use crate::context::ExecutionContext;
use crate::views::{self, AppliedIdentity, AppliedView, Style};
use anyhow::{Result, bail};
use gitid_runtime::{
    ConfigKey, GitConfigAdapter, KeyInspector, SystemKeyInspector, resolve_expected,
};
use gitid_types::Identity;
use std::path::Path;

pub fn handle(ctx: &ExecutionContext, name: Option<String>) -> Result<()> {
    let git = ctx.require_repository()?;
    let identity = select_identity(ctx, name.as_deref())?;

    let applied = apply(git, git.dir(), identity, &SystemKeyInspector)?;
    views::render(ctx.format, &applied, AppliedView::new(&applied, Style::detect()))
}

fn select_identity(ctx: &ExecutionContext, name: Option<&str>) -> Result<Identity> {
    let config = ctx.config()?;

    if let Some(name) = name {
        return match config.identity(name) {
            Some(identity) => Ok(identity.clone()),
            None => bail!(
                "Unknown identity '{}'. Defined identities: {}",
                name,
                defined_names(config.identities.iter().map(|i| i.name.as_str()))
            ),
        };
    }

    let remote_url = ctx.origin_url()?;
    match resolve_expected(config, ctx.cwd(), remote_url.as_deref())? {
        Some(expected) => Ok(expected.identity),
        None => bail!(
            "No rule matches {}. Pass an identity name: gitid use <IDENTITY>",
            ctx.cwd().display()
        ),
    }
}

/// Write the identity into the repository's local config
pub fn apply(
    git: &dyn GitConfigAdapter,
    repository: &Path,
    identity: Identity,
    keys: &dyn KeyInspector,
) -> Result<AppliedIdentity> {
    git.set(ConfigKey::UserName, &identity.user_name)?;
    git.set(ConfigKey::UserEmail, &identity.email)?;
    match &identity.gpg_key {
        Some(key) => git.set(ConfigKey::SigningKey, key)?,
        None => git.unset(ConfigKey::SigningKey)?,
    }
    tracing::info!(identity = %identity.name, "identity applied");

    let mut warnings = Vec::new();
    if let Some(path) = &identity.ssh_key
        && !keys.has_ssh_key(path)
    {
        warnings.push(format!("SSH key {} does not exist", path));
    }
    if let Some(key) = &identity.gpg_key
        && !keys.has_gpg_key(key)
    {
        warnings.push(format!("GPG key {} is not in the secret keyring", key));
    }

    Ok(AppliedIdentity {
        identity,
        repository: repository.to_path_buf(),
        warnings,
    })
}

fn defined_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let names: Vec<&str> = names.collect();
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryConfig {
        values: RefCell<HashMap<&'static str, String>>,
    }

    impl GitConfigAdapter for MemoryConfig {
        fn get(&self, key: ConfigKey) -> gitid_runtime::Result<Option<String>> {
            Ok(self.values.borrow().get(key.as_str()).cloned())
        }

        fn set(&self, key: ConfigKey, value: &str) -> gitid_runtime::Result<()> {
            self.values
                .borrow_mut()
                .insert(key.as_str(), value.to_string());
            Ok(())
        }

        fn unset(&self, key: ConfigKey) -> gitid_runtime::Result<()> {
            self.values.borrow_mut().remove(key.as_str());
            Ok(())
        }
    }

    struct NoKeys;

    impl KeyInspector for NoKeys {
        fn has_ssh_key(&self, _path: &str) -> bool {
            false
        }

        fn has_gpg_key(&self, _key_id: &str) -> bool {
            false
        }
    }

    #[test]
    fn test_apply_sets_signing_key_and_warns_on_missing_keys() {
        let git = MemoryConfig::default();
        let mut identity = Identity::new("work", "Alice Smith", "alice@work.com");
        identity.ssh_key = Some("~/.ssh/id_work".to_string());
        identity.gpg_key = Some("ABCD1234".to_string());

        let applied = apply(&git, Path::new("/repo"), identity, &NoKeys).unwrap();

        assert_eq!(
            git.get(ConfigKey::UserEmail).unwrap().as_deref(),
            Some("alice@work.com")
        );
        assert_eq!(
            git.get(ConfigKey::SigningKey).unwrap().as_deref(),
            Some("ABCD1234")
        );
        assert_eq!(applied.warnings.len(), 2);
    }

    #[test]
    fn test_apply_without_gpg_key_clears_stale_signing_key() {
        let git = MemoryConfig::default();
        git.set(ConfigKey::SigningKey, "OLDKEY").unwrap();

        let identity = Identity::new("oss", "Alice", "alice@home.net");
        let applied = apply(&git, Path::new("/repo"), identity, &NoKeys).unwrap();

        assert_eq!(git.get(ConfigKey::SigningKey).unwrap(), None);
        assert_eq!(
            git.get(ConfigKey::UserName).unwrap().as_deref(),
            Some("Alice")
        );
        assert!(applied.warnings.is_empty());
    }
}
