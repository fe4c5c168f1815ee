use crate::types::OutputFormat;
use anyhow::{Context, Result};
use gitid_core::{discover_working_dir, resolve_config_path};
use gitid_runtime::{Config, Git};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

pub struct ExecutionContext {
    config_path: PathBuf,
    cwd: PathBuf,
    config: OnceCell<Config>,
    git: OnceCell<Option<Git>>,
    pub format: OutputFormat,
}

impl ExecutionContext {
    pub fn new(config: Option<&str>, format: OutputFormat) -> Result<Self> {
        let config_path = resolve_config_path(config)?;
        let cwd = discover_working_dir()?;

        Ok(Self::with_paths(config_path, cwd, format))
    }

    pub fn with_paths(config_path: PathBuf, cwd: PathBuf, format: OutputFormat) -> Self {
        Self {
            config_path,
            cwd,
            config: OnceCell::new(),
            git: OnceCell::new(),
            format,
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Canonical working directory
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn config(&self) -> Result<&Config> {
        self.config.get_or_try_init(|| {
            tracing::debug!(path = %self.config_path.display(), "loading config");
            Config::load_from(&self.config_path)
                .with_context(|| format!("Failed to load {}", self.config_path.display()))
        })
    }

    /// The repository containing the working directory, if any
    pub fn repository(&self) -> Result<Option<&Git>> {
        let git = self.git.get_or_try_init(|| -> Result<Option<Git>> {
            match Git::discover(&self.cwd) {
                Ok(git) => Ok(Some(git)),
                Err(gitid_runtime::Error::NotARepository(_)) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })?;
        Ok(git.as_ref())
    }

    /// The repository containing the working directory; an error outside one
    pub fn require_repository(&self) -> Result<&Git> {
        self.repository()?
            .ok_or_else(|| anyhow::anyhow!("Not a git repository: {}", self.cwd.display()))
    }

    /// `origin` URL of the current repository
    pub fn origin_url(&self) -> Result<Option<String>> {
        match self.repository()? {
            Some(git) => Ok(git.origin_url()?),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_loads_empty() {
        let temp = TempDir::new().unwrap();
        let ctx = ExecutionContext::with_paths(
            temp.path().join("absent.toml"),
            temp.path().to_path_buf(),
            OutputFormat::Plain,
        );

        let config = ctx.config().unwrap();
        assert!(config.rules.is_empty());
        assert!(config.identities.is_empty());
    }

    #[test]
    fn test_plain_directory_has_no_repository() {
        let temp = TempDir::new().unwrap();
        let ctx = ExecutionContext::with_paths(
            temp.path().join("config.toml"),
            temp.path().canonicalize().unwrap(),
            OutputFormat::Plain,
        );

        assert!(ctx.repository().unwrap().is_none());
        assert!(ctx.require_repository().is_err());
        assert_eq!(ctx.origin_url().unwrap(), None);
    }
}
