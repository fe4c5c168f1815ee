use crate::types::{LogLevel, OutputFormat};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gitid")]
#[command(about = "Resolve, apply and audit the commit identity of git repositories", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to $GITID_CONFIG, then the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    /// Diagnostics on stderr; GITID_LOG takes precedence when set
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Show the current and expected identity for this directory")]
    Status {
        /// List every matching rule with its specificity score
        #[arg(long, short)]
        verbose: bool,
    },

    #[command(about = "Apply an identity to the repository's local git config")]
    Use {
        /// Identity name; resolved from the rules when omitted
        identity: Option<String>,
    },

    #[command(about = "Find commits authored with the wrong email")]
    Audit {
        /// Commits to scan (0 = 1000, negative = all)
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        limit: i64,

        /// Show matching commits too
        #[arg(long)]
        all: bool,

        /// Rewrite mismatched authors (destructive, asks for confirmation)
        #[arg(long)]
        fix: bool,
    },

    #[command(about = "Git hook helpers")]
    Hook {
        #[command(subcommand)]
        command: HookCommand,
    },

    #[command(about = "Inspect configured rules")]
    Rule {
        #[command(subcommand)]
        command: RuleCommand,
    },
}

#[derive(Subcommand)]
pub enum HookCommand {
    #[command(about = "Fail when user.email differs from the expected identity (pre-commit)")]
    Validate,
}

#[derive(Subcommand)]
pub enum RuleCommand {
    #[command(about = "List rules in evaluation order")]
    List,
}
