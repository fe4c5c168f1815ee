//! Scratch git repositories.
//!
//! Every git call runs with `HOME` pointed at the test home and system
//! config disabled, so the developer's own git configuration never leaks
//! into a test.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

pub const DEFAULT_BRANCH: &str = "main";

/// A working tree created for a single test
#[derive(Debug, Clone)]
pub struct TestRepo {
    dir: PathBuf,
    home: PathBuf,
}

impl TestRepo {
    /// `git init` a new repository at `dir` on branch `main`
    pub fn init(dir: &Path, home: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        let repo = Self {
            dir: dir.canonicalize()?,
            home: home.to_path_buf(),
        };
        repo.git(&["init", "-q"])?;
        repo.git(&["symbolic-ref", "HEAD", &format!("refs/heads/{}", DEFAULT_BRANCH)])?;
        Ok(repo)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn command(&self, dir: &Path) -> Command {
        let mut cmd = Command::new("git");
        cmd.current_dir(dir)
            .env("HOME", &self.home)
            .env("XDG_CONFIG_HOME", self.home.join(".config"))
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .env_remove("GIT_DIR")
            .env_remove("GIT_WORK_TREE");
        cmd
    }

    /// Run git in the repository and return trimmed stdout
    pub fn git(&self, args: &[&str]) -> Result<String> {
        run(self.command(&self.dir).args(args), args)
    }

    /// Create an empty commit authored and committed as `name <email>`; returns its hash
    pub fn commit_as(&self, name: &str, email: &str, subject: &str) -> Result<String> {
        let args = [
            "-c",
            "commit.gpgsign=false",
            "commit",
            "-q",
            "--allow-empty",
            "-m",
            subject,
        ];
        let mut cmd = self.command(&self.dir);
        cmd.args(args)
            .env("GIT_AUTHOR_NAME", name)
            .env("GIT_AUTHOR_EMAIL", email)
            .env("GIT_COMMITTER_NAME", name)
            .env("GIT_COMMITTER_EMAIL", email);
        run(&mut cmd, &args)?;
        self.head()
    }

    pub fn head(&self) -> Result<String> {
        self.git(&["rev-parse", "HEAD"])
    }

    /// Create a bare repository at `bare_dir` and register it as `origin`
    pub fn add_bare_origin(&self, bare_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(bare_dir)?;
        run(
            self.command(bare_dir).args(["init", "-q", "--bare"]),
            &["init", "--bare"],
        )?;
        let url = bare_dir.to_string_lossy();
        self.git(&["remote", "add", "origin", &url])?;
        Ok(())
    }

    /// Push the current branch to `origin` and track it
    pub fn push_upstream(&self) -> Result<()> {
        self.git(&["push", "-q", "-u", "origin", DEFAULT_BRANCH])?;
        Ok(())
    }

    pub fn add_remote(&self, name: &str, url: &str) -> Result<()> {
        self.git(&["remote", "add", name, url])?;
        Ok(())
    }

    pub fn remotes(&self) -> Result<Vec<String>> {
        Ok(self
            .git(&["remote"])?
            .lines()
            .map(String::from)
            .collect())
    }

    pub fn config_set(&self, key: &str, value: &str) -> Result<()> {
        self.git(&["config", "--local", key, value])?;
        Ok(())
    }

    pub fn config_get(&self, key: &str) -> Result<Option<String>> {
        let output = self.command(&self.dir).args(["config", "--get", key]).output()?;
        if !output.status.success() {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&output.stdout).trim().to_string()))
    }

    /// Author emails from HEAD backwards
    pub fn author_emails(&self) -> Result<Vec<String>> {
        Ok(self
            .git(&["log", "--format=%ae"])?
            .lines()
            .map(String::from)
            .collect())
    }
}

fn run(cmd: &mut Command, args: &[&str]) -> Result<String> {
    let output = cmd
        .output()
        .with_context(|| format!("Failed to spawn git {}", args.join(" ")))?;
    if !output.status.success() {
        anyhow::bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_commit_as_sets_author() {
        let temp = TempDir::new().unwrap();
        let repo = TestRepo::init(&temp.path().join("repo"), temp.path()).unwrap();

        repo.commit_as("Alice", "alice@home.net", "first").unwrap();
        repo.commit_as("Alice", "alice@work.com", "second").unwrap();

        assert_eq!(
            repo.author_emails().unwrap(),
            vec!["alice@work.com", "alice@home.net"]
        );
    }

    #[test]
    fn test_push_upstream_tracks_origin() {
        let temp = TempDir::new().unwrap();
        let repo = TestRepo::init(&temp.path().join("repo"), temp.path()).unwrap();
        repo.add_bare_origin(&temp.path().join("origin.git")).unwrap();
        repo.commit_as("Alice", "alice@work.com", "first").unwrap();
        repo.push_upstream().unwrap();

        let upstream = repo
            .git(&["rev-parse", "--abbrev-ref", "@{upstream}"])
            .unwrap();
        assert_eq!(upstream, "origin/main");
    }
}
