//! Console renderers.
//!
//! Every view is a `fmt::Display` over borrowed data plus a [`Style`], so
//! tests can render them without a terminal.

mod audit;
mod fix;
mod rule;
mod status;

pub use audit::AuditView;
pub use fix::{FixReportView, FixSummaryView};
pub use rule::{RuleListView, RuleRow};
pub use status::{AppliedIdentity, AppliedView, CandidateRow, KeyCheck, StatusReport, StatusView};

use crate::types::OutputFormat;
use anyhow::Result;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::fmt::Display;

/// Colour policy for console output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    color: bool,
}

impl Style {
    /// Colour only when stdout is a terminal and `NO_COLOR` is unset
    pub fn detect() -> Self {
        Self {
            color: std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
        }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn ok(&self, text: &str) -> String {
        if self.color {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn warn(&self, text: &str) -> String {
        if self.color {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn bad(&self, text: &str) -> String {
        if self.color {
            text.red().bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn accent(&self, text: &str) -> String {
        if self.color {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Print `data` as pretty JSON or `view` as console text
pub fn render<T, V>(format: OutputFormat, data: &T, view: V) -> Result<()>
where
    T: Serialize,
    V: Display,
{
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(data)?),
        OutputFormat::Plain => print!("{}", view),
    }
    Ok(())
}

/// Truncate to `max` characters, marking the cut with `…`
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}
