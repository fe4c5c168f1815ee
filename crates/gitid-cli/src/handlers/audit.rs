use crate::context::ExecutionContext;
use crate::prompt::ConsoleFixInteraction;
use crate::types::OutputFormat;
use crate::views::{self, AuditView, FixReportView, Style};
use anyhow::{Result, bail};
use gitid_runtime::{AuditOptions, FixOptions, GitRewriteBackend, fix, scan};

pub fn handle(ctx: &ExecutionContext, limit: i64, show_all: bool, run_fix: bool) -> Result<()> {
    if run_fix && ctx.format == OutputFormat::Json {
        bail!("--fix is interactive and cannot be combined with --format json");
    }

    let config = ctx.config()?;
    let git = ctx.require_repository()?;
    let options = AuditOptions { limit, show_all };

    let result = scan(config, git, ctx.cwd(), &options)?;
    let style = Style::detect();
    views::render(ctx.format, &result, AuditView::new(&result, style))?;

    if !run_fix {
        return Ok(());
    }
    if !result.has_expected_identity() {
        bail!("No rule matches this directory, so there is no identity to rewrite commits to");
    }

    println!();
    let backend = GitRewriteBackend::new(git.clone());
    let mut ui = ConsoleFixInteraction::stdio(style);
    let report = fix(&result, &backend, &mut ui, &FixOptions::default())?;

    print!("{}", FixReportView::new(&report, style));
    Ok(())
}
