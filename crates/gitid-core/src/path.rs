use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Resolve the configuration file path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. GITID_CONFIG environment variable (with tilde expansion)
/// 3. System config directory (recommended default)
/// 4. ~/.gitid/config.toml (fallback for systems without a config directory)
pub fn resolve_config_path(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("GITID_CONFIG")
        && !env_path.is_empty()
    {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        return Ok(config_dir.join("gitid").join("config.toml"));
    }

    if let Some(home) = home_dir() {
        return Ok(home.join(".gitid").join("config.toml"));
    }

    Err(Error::Config(
        "Could not determine config path: no HOME directory or system config directory found"
            .to_string(),
    ))
}

/// Home directory, preferring `$HOME` so tests and sandboxes can override it
pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
}

/// Expand a leading tilde (`~` or `~/...`) to the user's home directory.
///
/// `~user` forms are left untouched.
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~"
        && let Some(home) = home_dir()
    {
        return home;
    }
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

/// Normalize a path for comparison (resolve to absolute, canonicalize if possible)
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf())
        }
    })
}

/// The canonical process working directory identities are resolved for.
///
/// A directory that cannot be resolved is a fatal environment error.
pub fn discover_working_dir() -> Result<PathBuf> {
    let dir = std::env::current_dir()
        .map_err(|e| Error::Config(format!("Cannot resolve working directory: {}", e)))?;

    dir.canonicalize().map_err(|e| {
        Error::Config(format!(
            "Cannot resolve working directory {}: {}",
            dir.display(),
            e
        ))
    })
}
