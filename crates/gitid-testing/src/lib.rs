//! Testing infrastructure for gitid integration tests.
//!
//! - `TestWorld`: isolated home directory, config file and CLI runner
//! - `TestRepo`: scratch git repositories with controlled authors and remotes
//! - `fixtures`: sample identities and config files
//! - `assertions`: checks over the CLI's JSON output

pub mod assertions;
pub mod fixtures;
pub mod repo;
pub mod world;

pub use fixtures::ConfigFile;
pub use repo::TestRepo;
pub use world::{CliResult, TestWorld};
