use super::args::{Cli, Commands, HookCommand, RuleCommand};
use super::handlers;
use crate::context::ExecutionContext;
use crate::logging;
use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level);

    let ctx = ExecutionContext::new(cli.config.as_deref(), cli.format)?;
    tracing::debug!(
        config = %ctx.config_path().display(),
        cwd = %ctx.cwd().display(),
        "starting"
    );

    match cli.command {
        Commands::Status { verbose } => handlers::status::handle(&ctx, verbose),

        Commands::Use { identity } => handlers::use_identity::handle(&ctx, identity),

        Commands::Audit { limit, all, fix } => handlers::audit::handle(&ctx, limit, all, fix),

        Commands::Hook { command } => match command {
            HookCommand::Validate => handlers::hook::validate(&ctx),
        },

        Commands::Rule { command } => match command {
            RuleCommand::List => handlers::rule::list(&ctx),
        },
    }
}
