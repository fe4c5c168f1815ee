mod args;
mod commands;
pub mod context;
mod handlers;
pub mod logging;
pub mod prompt;
pub mod types;
pub mod views;

pub use args::{Cli, Commands, HookCommand, RuleCommand};
pub use commands::run;
