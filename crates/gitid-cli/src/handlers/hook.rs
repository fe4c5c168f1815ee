use crate::context::ExecutionContext;
use crate::types::OutputFormat;
use anyhow::{Result, bail};
use gitid_runtime::{ConfigKey, GitConfigAdapter, resolve_expected};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct HookOutcome<'a> {
    valid: bool,
    expected_email: Option<&'a str>,
    configured_email: Option<&'a str>,
}

/// Pre-commit check: succeed when no rule applies or `user.email` matches.
pub fn validate(ctx: &ExecutionContext) -> Result<()> {
    let config = ctx.config()?;
    let git = ctx.require_repository()?;
    let remote_url = git.origin_url()?;

    let Some(expected) = resolve_expected(config, ctx.cwd(), remote_url.as_deref())? else {
        tracing::info!("no rule matches; commit allowed");
        return report(ctx, None, None);
    };

    let configured = git.get(ConfigKey::UserEmail)?;
    let valid = configured
        .as_deref()
        .is_some_and(|email| expected.identity.email_matches(email));
    if valid {
        return report(
            ctx,
            Some(expected.identity.email.as_str()),
            configured.as_deref(),
        );
    }

    bail!(
        "Commit blocked: user.email is {} but this repository expects '{}' <{}> (rule: {}). \
         Run 'gitid use' to fix.",
        configured
            .as_deref()
            .map(|e| format!("'{}'", e))
            .unwrap_or_else(|| "not set".to_string()),
        expected.identity.name,
        expected.identity.email,
        expected.rule
    )
}

fn report(
    ctx: &ExecutionContext,
    expected_email: Option<&str>,
    configured_email: Option<&str>,
) -> Result<()> {
    if ctx.format == OutputFormat::Json {
        let outcome = HookOutcome {
            valid: true,
            expected_email,
            configured_email,
        };
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }
    Ok(())
}
