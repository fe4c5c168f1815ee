use std::fmt;
use std::path::PathBuf;

/// Result type for gitid-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// Path/remote layer error
    Core(gitid_core::Error),

    /// Rule validation error
    Engine(gitid_engine::Error),

    /// IO operation failed
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// Configuration file is not valid TOML
    ConfigParse(toml::de::Error),

    /// A rule references an identity the store does not define
    UnknownIdentity(String),

    /// The working directory is not inside a git repository
    NotARepository(PathBuf),

    /// An external program could not be started
    Spawn {
        program: String,
        source: std::io::Error,
    },

    /// A git invocation exited unsuccessfully
    Git { command: String, stderr: String },

    /// Mirror backup could not be created or verified
    Backup(String),

    /// git-filter-repo is not installed
    ToolUnavailable,

    /// The scan found no mismatched commits
    NothingToFix,

    /// The operator did not type the confirmation phrase
    Aborted,

    /// The rewrite tool failed after the backup was taken
    RewriteFailed { backup: PathBuf, reason: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Core(err) => write!(f, "{}", err),
            Error::Engine(err) => write!(f, "Configuration error: {}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::ConfigParse(err) => write!(f, "Configuration error: {}", err),
            Error::UnknownIdentity(name) => write!(
                f,
                "Configuration error: a rule references unknown identity '{}'",
                name
            ),
            Error::NotARepository(path) => {
                write!(f, "Not a git repository: {}", path.display())
            }
            Error::Spawn { program, source } => {
                write!(f, "Failed to run '{}': {}", program, source)
            }
            Error::Git { command, stderr } => {
                write!(f, "'{}' failed: {}", command, stderr.trim())
            }
            Error::Backup(msg) => write!(f, "Backup failed: {}", msg),
            Error::ToolUnavailable => write!(
                f,
                "git-filter-repo is not installed. Install it with 'pip install git-filter-repo', \
                 'brew install git-filter-repo' or your distribution's package manager, then retry."
            ),
            Error::NothingToFix => write!(f, "Nothing to fix: no mismatched commits were found"),
            Error::Aborted => write!(
                f,
                "Confirmation phrase did not match. Aborted; no changes were made."
            ),
            Error::RewriteFailed { backup, reason } => write!(
                f,
                "History rewrite failed: {}. Your original history is preserved in the backup at {}",
                reason,
                backup.display()
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Core(err) => Some(err),
            Error::Engine(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::ConfigParse(err) => Some(err),
            Error::Spawn { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<gitid_core::Error> for Error {
    fn from(err: gitid_core::Error) -> Self {
        Error::Core(err)
    }
}

impl From<gitid_engine::Error> for Error {
    fn from(err: gitid_engine::Error) -> Self {
        Error::Engine(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::ConfigParse(err)
    }
}
