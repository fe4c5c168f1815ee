//! Thin adapter over the `git` executable.
//!
//! Every call is a blocking child process run inside the repository
//! directory. No timeout is imposed; callers that need one wrap the call.

use crate::{Error, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Output, Stdio};

/// Handle to a repository working tree
#[derive(Debug, Clone)]
pub struct Git {
    dir: PathBuf,
}

impl Git {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Open the repository containing `cwd`, rooted at its top-level directory
    pub fn discover(cwd: &Path) -> Result<Self> {
        let probe = Self::new(cwd);
        match probe.try_run(["rev-parse", "--show-toplevel"])? {
            Some(top) => Ok(Self::new(top.trim())),
            None => Err(Error::NotARepository(cwd.to_path_buf())),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn command<I, S>(&self, args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new("git");
        cmd.args(args).current_dir(&self.dir).stdin(Stdio::null());
        cmd
    }

    fn output<I, S>(&self, args: I) -> Result<(String, Output)>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<S> = args.into_iter().collect();
        let rendered = render_command(&args);
        tracing::debug!(command = %rendered, dir = %self.dir.display(), "running git");

        let output = self
            .command(&args)
            .output()
            .map_err(|source| Error::Spawn {
                program: "git".to_string(),
                source,
            })?;
        Ok((rendered, output))
    }

    /// Run git and return stdout; a non-zero exit is an error
    pub fn run<I, S>(&self, args: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let (command, output) = self.output(args)?;
        if !output.status.success() {
            return Err(Error::Git {
                command,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Run git where a non-zero exit is an expected answer (`None`), not a failure
    pub fn try_run<I, S>(&self, args: I) -> Result<Option<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let (command, output) = self.output(args)?;
        if output.status.success() {
            Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned()))
        } else {
            tracing::debug!(
                command = %command,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "git exited non-zero"
            );
            Ok(None)
        }
    }

    /// Run git with the operator's stdout/stderr attached so progress is visible live
    pub fn run_inherited<I, S>(&self, args: I) -> Result<ExitStatus>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<S> = args.into_iter().collect();
        tracing::debug!(command = %render_command(&args), "running git (inherited stdio)");
        self.command(&args)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| Error::Spawn {
                program: "git".to_string(),
                source,
            })
    }

    /// Whether HEAD resolves to a commit; false for a freshly initialized repository
    pub fn has_commits(&self) -> Result<bool> {
        Ok(self
            .try_run(["rev-parse", "--verify", "--quiet", "HEAD^{commit}"])?
            .is_some())
    }

    /// Upstream tracking ref of the current branch (e.g. `origin/main`)
    pub fn upstream_ref(&self) -> Result<Option<String>> {
        Ok(self
            .try_run(["rev-parse", "--abbrev-ref", "--symbolic-full-name", "@{upstream}"])?
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()))
    }

    pub fn remote_url(&self, name: &str) -> Result<Option<String>> {
        self.config_get(&format!("remote.{}.url", name))
    }

    /// URL of `origin`, the only remote identity rules look at
    pub fn origin_url(&self) -> Result<Option<String>> {
        self.get(ConfigKey::OriginUrl)
    }

    pub fn remotes(&self) -> Result<Vec<String>> {
        Ok(self
            .run(["remote"])?
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect())
    }

    /// Remove a remote; a remote that no longer exists counts as removed
    pub fn remove_remote(&self, name: &str) -> Result<()> {
        if !self.remotes()?.iter().any(|r| r == name) {
            tracing::debug!(remote = name, "remote already gone");
            return Ok(());
        }
        self.run(["remote", "remove", name])?;
        Ok(())
    }

    /// Whether `git filter-repo` is installed and runnable
    pub fn filter_repo_available(&self) -> bool {
        matches!(self.try_run(["filter-repo", "--version"]), Ok(Some(_)))
    }

    fn config_get(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .try_run(["config", "--get", key])?
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty()))
    }
}

/// Git configuration keys the identity workflow reads and writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    UserName,
    UserEmail,
    SigningKey,
    OriginUrl,
}

impl ConfigKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::UserName => "user.name",
            ConfigKey::UserEmail => "user.email",
            ConfigKey::SigningKey => "user.signingkey",
            ConfigKey::OriginUrl => "remote.origin.url",
        }
    }
}

/// get/set/unset of identity-related git configuration.
///
/// `get` reads the effective value (any scope); `set` and `unset` only
/// touch the repository-local config.
pub trait GitConfigAdapter {
    fn get(&self, key: ConfigKey) -> Result<Option<String>>;
    fn set(&self, key: ConfigKey, value: &str) -> Result<()>;
    fn unset(&self, key: ConfigKey) -> Result<()>;
}

impl GitConfigAdapter for Git {
    fn get(&self, key: ConfigKey) -> Result<Option<String>> {
        self.config_get(key.as_str())
    }

    fn set(&self, key: ConfigKey, value: &str) -> Result<()> {
        self.run(["config", "--local", key.as_str(), value])?;
        Ok(())
    }

    fn unset(&self, key: ConfigKey) -> Result<()> {
        let (command, output) = self.output(["config", "--local", "--unset", key.as_str()])?;
        // exit code 5: the key was not set
        match output.status.code() {
            Some(0) | Some(5) => Ok(()),
            _ => Err(Error::Git {
                command,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }),
        }
    }
}

fn render_command<S: AsRef<OsStr>>(args: &[S]) -> String {
    let mut rendered = String::from("git");
    for arg in args {
        rendered.push(' ');
        rendered.push_str(&arg.as_ref().to_string_lossy());
    }
    rendered
}
