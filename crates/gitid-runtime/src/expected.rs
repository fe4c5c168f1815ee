use crate::config::RuleStore;
use crate::{Error, Result};
use gitid_engine::{ResolveContext, resolve};
use gitid_types::{Identity, Rule};
use std::path::Path;

/// The identity a context should commit as, and the rule that selected it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedIdentity {
    pub rule: Rule,
    pub identity: Identity,
    pub score: i32,
}

/// Resolve the expected identity for `cwd` and its `origin` URL.
///
/// `Ok(None)` when no rule applies. A matching rule that names an identity
/// the store does not know is a configuration error.
pub fn resolve_expected(
    store: &dyn RuleStore,
    cwd: &Path,
    remote_url: Option<&str>,
) -> Result<Option<ExpectedIdentity>> {
    let rules = store.list_rules()?;
    let ctx = ResolveContext::new(cwd, remote_url);

    let Some(best) = resolve(&rules, &ctx) else {
        return Ok(None);
    };

    let identity = store
        .get_identity(&best.rule.identity)?
        .ok_or_else(|| Error::UnknownIdentity(best.rule.identity.clone()))?;

    tracing::debug!(rule = %best.rule, score = best.score, "resolved expected identity");
    Ok(Some(ExpectedIdentity {
        rule: best.rule.clone(),
        identity,
        score: best.score,
    }))
}
