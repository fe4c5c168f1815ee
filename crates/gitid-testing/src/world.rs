//! TestWorld pattern for declarative integration test setup.
//!
//! Provides a fluent interface for:
//! - Creating an isolated home directory and config file
//! - Creating scratch repositories inside it
//! - Executing the CLI with the right config, cwd and environment

use anyhow::Result;
use assert_cmd::Command;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures::ConfigFile;
use crate::repo::TestRepo;

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use gitid_testing::{ConfigFile, TestWorld, fixtures};
/// use gitid_types::Rule;
///
/// let world = TestWorld::new().with_config(
///     ConfigFile::new()
///         .identity(fixtures::work_identity())
///         .rule(Rule::directory("~/work/**", "work")),
/// );
/// let repo = world.init_repo("work/api").unwrap();
///
/// let result = world.run_in(repo.dir(), &["status"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    home: PathBuf,
    cwd: PathBuf,
    config_path: PathBuf,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let home = temp_dir
            .path()
            .canonicalize()
            .expect("Failed to canonicalize temp dir");
        let config_path = home.join(".config").join("gitid").join("config.toml");

        Self {
            cwd: home.clone(),
            home,
            config_path,
            temp_dir,
            env_vars: HashMap::new(),
        }
    }

    /// Isolated `HOME` for git and tilde expansion
    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Get the temp directory root.
    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `config` to this world's config file.
    pub fn with_config(self, config: ConfigFile) -> Self {
        config
            .write_to(&self.config_path)
            .expect("Failed to write config");
        self
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Change the current working directory (relative to home).
    pub fn enter_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.set_cwd(path);
        self
    }

    /// Set the current working directory without consuming self.
    pub fn set_cwd<P: AsRef<Path>>(&mut self, path: P) {
        let new_cwd = if path.as_ref().is_absolute() {
            path.as_ref().to_path_buf()
        } else {
            self.home.join(path)
        };

        std::fs::create_dir_all(&new_cwd).expect("Failed to create directory");
        self.cwd = new_cwd;
    }

    /// `git init` a repository at `rel` (relative to home).
    pub fn init_repo(&self, rel: &str) -> Result<TestRepo> {
        TestRepo::init(&self.home.join(rel), &self.home)
    }

    /// Repository at `rel` with a bare `origin` next to it.
    pub fn init_repo_with_origin(&self, rel: &str) -> Result<TestRepo> {
        let repo = self.init_repo(rel)?;
        let bare = self.home.join("remotes").join(format!("{}.git", rel.replace('/', "-")));
        repo.add_bare_origin(&bare)?;
        Ok(repo)
    }

    /// Configure a CLI command with this test environment's settings.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        self.configure_command_in(cmd, &self.cwd)
    }

    fn configure_command_in<'a>(&self, cmd: &'a mut Command, cwd: &Path) -> &'a mut Command {
        cmd.arg("--config").arg(&self.config_path);

        cmd.current_dir(cwd)
            .env("HOME", &self.home)
            .env("XDG_CONFIG_HOME", self.home.join(".config"))
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .env("NO_COLOR", "1")
            .env_remove("GITID_CONFIG")
            .env_remove("GITID_LOG")
            .env_remove("GIT_DIR")
            .env_remove("GIT_WORK_TREE");

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Execute the `gitid` binary in the current working directory.
    ///
    /// Uses `Command::cargo_bin()`, which needs the binary built by
    /// `cargo test` for the `gitid` package.
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        self.execute(&self.cwd, args, "")
    }

    /// Execute the `gitid` binary with `input` on stdin.
    pub fn run_with_stdin(&self, args: &[&str], input: &str) -> Result<CliResult> {
        self.execute(&self.cwd, args, input)
    }

    /// Execute in `dir` without changing the world's cwd.
    pub fn run_in<P: AsRef<Path>>(&self, dir: P, args: &[&str]) -> Result<CliResult> {
        self.execute(dir.as_ref(), args, "")
    }

    /// Execute in `dir` with `input` on stdin.
    pub fn run_in_with_stdin<P: AsRef<Path>>(
        &self,
        dir: P,
        args: &[&str],
        input: &str,
    ) -> Result<CliResult> {
        self.execute(dir.as_ref(), args, input)
    }

    #[allow(deprecated)]
    fn execute(&self, cwd: &Path, args: &[&str], input: &str) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("gitid")
            .map_err(|e| anyhow::anyhow!("Failed to find gitid binary: {}", e))?;

        self.configure_command_in(&mut cmd, cwd);
        cmd.args(args).write_stdin(input.to_string());

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Check if the command succeeded.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    /// Get stdout as a string.
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Get stderr as a string.
    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
