use crate::context::ExecutionContext;
use crate::views::{self, CandidateRow, KeyCheck, Style, StatusReport, StatusView};
use anyhow::Result;
use gitid_engine::{ResolveContext, evaluate, resolve};
use gitid_runtime::{
    ConfigKey, Git, GitConfigAdapter, KeyInspector, SystemKeyInspector, resolve_expected,
};

pub fn handle(ctx: &ExecutionContext, verbose: bool) -> Result<()> {
    let report = build_report(ctx, verbose, &SystemKeyInspector)?;
    views::render(ctx.format, &report, StatusView::new(&report, Style::detect()))
}

pub fn build_report(
    ctx: &ExecutionContext,
    verbose: bool,
    keys: &dyn KeyInspector,
) -> Result<StatusReport> {
    let config = ctx.config()?;
    let repository = ctx.repository()?;
    let remote_url = ctx.origin_url()?;

    // outside a repository only global config applies
    let reader = repository.cloned().unwrap_or_else(|| Git::new(ctx.cwd()));
    let current_name = reader.get(ConfigKey::UserName)?;
    let current_email = reader.get(ConfigKey::UserEmail)?;

    let expected = resolve_expected(config, ctx.cwd(), remote_url.as_deref())?;

    let candidates = if verbose {
        let resolve_ctx = ResolveContext::new(ctx.cwd(), remote_url.as_deref());
        let selected = resolve(&config.rules, &resolve_ctx).map(|c| c.index);
        evaluate(&config.rules, &resolve_ctx)
            .into_iter()
            .map(|c| CandidateRow {
                index: c.index,
                rule: c.rule.clone(),
                score: c.score,
                selected: Some(c.index) == selected,
            })
            .collect()
    } else {
        Vec::new()
    };

    let email_matches = expected.as_ref().map(|e| {
        current_email
            .as_deref()
            .is_some_and(|email| e.identity.email_matches(email))
    });

    let ssh_key = expected
        .as_ref()
        .and_then(|e| e.identity.ssh_key.clone())
        .map(|value| KeyCheck {
            present: keys.has_ssh_key(&value),
            value,
        });
    let gpg_key = expected
        .as_ref()
        .and_then(|e| e.identity.gpg_key.clone())
        .map(|value| KeyCheck {
            present: keys.has_gpg_key(&value),
            value,
        });

    Ok(StatusReport {
        cwd: ctx.cwd().to_path_buf(),
        repository: repository.map(|git| git.dir().to_path_buf()),
        remote_url,
        current_name,
        current_email,
        matched_rule: expected.as_ref().map(|e| e.rule.clone()),
        score: expected.as_ref().map(|e| e.score),
        expected: expected.map(|e| e.identity),
        email_matches,
        ssh_key,
        gpg_key,
        candidates,
    })
}
