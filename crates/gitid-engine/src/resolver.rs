use crate::matcher::rule_matches;
use crate::score::specificity;
use gitid_core::parse_remote_url;
use gitid_types::{ParsedRemote, Rule};
use std::path::Path;

/// Where identity resolution happens: a working directory and, optionally,
/// the raw `origin` URL of the repository it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    pub cwd: &'a Path,
    pub remote_url: Option<&'a str>,
}

impl<'a> ResolveContext<'a> {
    pub fn new(cwd: &'a Path, remote_url: Option<&'a str>) -> Self {
        Self { cwd, remote_url }
    }

    fn parsed_remote(&self) -> Option<ParsedRemote> {
        let url = self.remote_url?;
        match parse_remote_url(url) {
            Ok(remote) => Some(remote),
            Err(err) => {
                tracing::debug!(url, error = %err, "remote rules skipped");
                None
            }
        }
    }
}

/// A matching rule together with its position in the rule list and its score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub index: usize,
    pub rule: &'a Rule,
    pub score: i32,
}

/// Every rule matching the context, in rule-list order
pub fn evaluate<'a>(rules: &'a [Rule], ctx: &ResolveContext<'_>) -> Vec<Candidate<'a>> {
    let remote = ctx.parsed_remote();

    rules
        .iter()
        .enumerate()
        .filter(|(_, rule)| rule_matches(rule, ctx.cwd, remote.as_ref()))
        .map(|(index, rule)| Candidate {
            index,
            rule,
            score: specificity(rule),
        })
        .collect()
}

/// Pick the single most specific matching rule.
///
/// Only a strictly greater score replaces the current best, so among equal
/// scores the earliest rule in list order wins. `None` when nothing matches.
pub fn resolve<'a>(rules: &'a [Rule], ctx: &ResolveContext<'_>) -> Option<Candidate<'a>> {
    let mut best: Option<Candidate<'a>> = None;
    for candidate in evaluate(rules, ctx) {
        if best.is_none_or(|b| candidate.score > b.score) {
            best = Some(candidate);
        }
    }
    best
}
