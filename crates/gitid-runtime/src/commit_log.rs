//! Bounded commit metadata from `git log`.
//!
//! One `git log` pass emits `hash, author name, author email, author date,
//! subject` per commit. Fields are joined by [`FIELD_DELIMITER`] and every
//! record starts with [`RECORD_MARKER`]. Both are ASCII control characters
//! git never puts into a one-line subject. A malformed record is dropped on
//! its own; it never aborts the scan.

use crate::git::Git;
use crate::Result;
use chrono::DateTime;
use gitid_types::Commit;

/// Private 3-character field delimiter (`%x1f%x1f%x1f`)
pub const FIELD_DELIMITER: &str = "\x1f\x1f\x1f";
/// Private record marker (`%x1e`)
pub const RECORD_MARKER: &str = "\x1e";
/// `YYYY-MM-DD HH:MM:SS ±HHMM`
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";
pub const DEFAULT_COMMIT_LIMIT: usize = 1000;

const FIELD_COUNT: usize = 5;
const LOG_FORMAT: &str = "--format=%x1e%H%x1f%x1f%x1f%an%x1f%x1f%x1f%ae%x1f%x1f%x1f%ad%x1f%x1f%x1f%s";
const LOG_DATE: &str = "--date=format:%Y-%m-%d %H:%M:%S %z";

/// How many commits to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitLimit {
    Bounded(usize),
    Unbounded,
}

impl CommitLimit {
    /// `0` means the default cap, a negative number means no cap
    pub fn from_requested(requested: i64) -> Self {
        match requested {
            0 => CommitLimit::Bounded(DEFAULT_COMMIT_LIMIT),
            n if n < 0 => CommitLimit::Unbounded,
            n => CommitLimit::Bounded(usize::try_from(n).unwrap_or(usize::MAX)),
        }
    }
}

/// Read commits reachable from HEAD, most recent first.
///
/// A repository without any commit yields an empty list.
pub fn read_commits(git: &Git, limit: CommitLimit) -> Result<Vec<Commit>> {
    if !git.has_commits()? {
        tracing::debug!(dir = %git.dir().display(), "repository has no commits");
        return Ok(Vec::new());
    }

    let mut args = vec![
        "log".to_string(),
        LOG_FORMAT.to_string(),
        LOG_DATE.to_string(),
        "--no-show-signature".to_string(),
    ];
    if let CommitLimit::Bounded(n) = limit {
        args.push(format!("--max-count={}", n));
    }
    args.push("HEAD".to_string());

    let output = git.run(&args)?;
    Ok(parse_log(&output))
}

/// Parse raw `git log` output produced with the private format
pub fn parse_log(output: &str) -> Vec<Commit> {
    output
        .split(RECORD_MARKER)
        .filter(|record| !record.trim().is_empty())
        .filter_map(|record| {
            let commit = parse_record(record);
            if commit.is_none() {
                tracing::debug!(record = %record.escape_debug(), "skipping malformed log record");
            }
            commit
        })
        .collect()
}

fn parse_record(record: &str) -> Option<Commit> {
    let record = record.trim_end_matches(['\n', '\r']);
    let fields: Vec<&str> = record.splitn(FIELD_COUNT, FIELD_DELIMITER).collect();
    if fields.len() < FIELD_COUNT {
        return None;
    }

    let hash = fields[0].trim();
    if hash.is_empty() {
        return None;
    }
    let date = DateTime::parse_from_str(fields[3].trim(), DATE_FORMAT).ok()?;

    Some(Commit {
        hash: hash.to_string(),
        author_name: fields[1].to_string(),
        author_email: fields[2].trim().to_string(),
        date,
        subject: fields[4].to_string(),
    })
}
