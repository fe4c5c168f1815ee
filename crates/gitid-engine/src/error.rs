use std::fmt;

/// Result type for gitid-engine operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A rule violates its pattern invariants
    InvalidRule { pattern: String, reason: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidRule { pattern, reason } => {
                write!(f, "Invalid rule pattern '{}': {}", pattern, reason)
            }
        }
    }
}

impl std::error::Error for Error {}
