//! Diagnostics on stderr.
//!
//! User-facing output goes to stdout through the views; everything emitted
//! with `tracing` lands on stderr so it never corrupts `--format json`.

use crate::types::LogLevel;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_ENV: &str = "GITID_LOG";

/// Install the global subscriber. `GITID_LOG` (EnvFilter syntax) wins over `level`.
pub fn init(level: LogLevel) {
    let filter = std::env::var(LOG_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
        .unwrap_or_else(|| EnvFilter::new(level.to_string()));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time()
                .compact(),
        )
        .try_init();
}
