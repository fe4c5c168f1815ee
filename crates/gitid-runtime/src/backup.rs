//! Mirror backups taken before any history rewrite.
//!
//! The mirror is cloned with `--no-hardlinks` so it shares no object storage
//! with the source repository: rewriting one can never corrupt the other.
//! Once created, the backup belongs to the operator; nothing here reads it
//! again.

use crate::git::Git;
use crate::{Error, Result};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

/// `<root>/<repo>-backup-<YYYYmmdd-HHMMSS>`
pub fn backup_path(root: &Path, repo_dir: &Path, timestamp: DateTime<Local>) -> PathBuf {
    let repo_name = repo_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "repo".to_string());

    root.join(format!(
        "{}-backup-{}",
        repo_name,
        timestamp.format("%Y%m%d-%H%M%S")
    ))
}

/// Create and verify a full, storage-independent mirror clone of `git`'s repository
pub fn create_mirror_backup(git: &Git, root: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(root)?;
    let dest = unique_path(backup_path(root, git.dir(), Local::now()));

    let source = git.dir().to_string_lossy().into_owned();
    let target = dest.to_string_lossy().into_owned();
    git.run([
        "clone",
        "--mirror",
        "--no-hardlinks",
        "--quiet",
        source.as_str(),
        target.as_str(),
    ])
    .map_err(|e| Error::Backup(e.to_string()))?;

    verify_mirror(git, &Git::new(&dest))?;
    tracing::info!(backup = %dest.display(), "mirror backup created");
    Ok(dest)
}

/// The mirror must carry every ref of the source at the same object
fn verify_mirror(source: &Git, mirror: &Git) -> Result<()> {
    let refs = |git: &Git| -> Result<Vec<String>> {
        let mut lines: Vec<String> = git
            .run(["for-each-ref", "--format=%(objectname) %(refname)"])?
            .lines()
            .map(String::from)
            .collect();
        lines.sort();
        Ok(lines)
    };

    let expected = refs(source)?;
    let actual = refs(mirror)?;
    if expected != actual {
        return Err(Error::Backup(format!(
            "mirror at {} does not match the source refs ({} vs {})",
            mirror.dir().display(),
            actual.len(),
            expected.len()
        )));
    }
    Ok(())
}

fn unique_path(candidate: PathBuf) -> PathBuf {
    if !candidate.exists() {
        return candidate;
    }
    let base = candidate.to_string_lossy().into_owned();
    (1..)
        .map(|n| PathBuf::from(format!("{}-{}", base, n)))
        .find(|p| !p.exists())
        .unwrap_or(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_backup_path_format() {
        let ts = Local.with_ymd_and_hms(2024, 3, 1, 10, 15, 0).unwrap();
        let path = backup_path(Path::new("/tmp"), Path::new("/home/alice/work/api"), ts);
        assert_eq!(path, PathBuf::from("/tmp/api-backup-20240301-101500"));
    }

    #[test]
    fn test_backup_path_for_root_dir() {
        let ts = Local.with_ymd_and_hms(2024, 3, 1, 10, 15, 0).unwrap();
        let path = backup_path(Path::new("/tmp"), Path::new("/"), ts);
        assert_eq!(path, PathBuf::from("/tmp/repo-backup-20240301-101500"));
    }
}
