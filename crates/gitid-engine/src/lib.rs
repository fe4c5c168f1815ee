//! Pure identity resolution.
//!
//! Given the configured rules, the canonical working directory and the
//! `origin` remote URL, pick the single most specific matching rule.
//! Nothing here touches git or mutates state.

mod error;
mod matcher;
mod resolver;
mod score;
mod validate;

pub use error::{Error, Result};
pub use matcher::{directory_matches, remote_matches, rule_matches};
pub use resolver::{Candidate, ResolveContext, evaluate, resolve};
pub use score::specificity;
pub use validate::validate_rule;
