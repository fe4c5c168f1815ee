pub mod backup;
pub mod commit_log;
pub mod config;
pub mod error;
pub mod expected;
pub mod git;
pub mod keys;
pub mod mailmap;
pub mod push_state;
pub mod rewrite;
pub mod scanner;

pub use config::{Config, RuleStore};
pub use error::{Error, Result};
pub use expected::{ExpectedIdentity, resolve_expected};
pub use git::{ConfigKey, Git, GitConfigAdapter};
pub use keys::{KeyInspector, SystemKeyInspector};
pub use rewrite::{
    CONFIRMATION_PHRASE, FixInteraction, FixOptions, FixReport, FixStep, FixSummary,
    GitRewriteBackend, Remote, RewriteBackend, fix,
};
pub use scanner::{AuditOptions, scan};
