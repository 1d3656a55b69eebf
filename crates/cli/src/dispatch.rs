//! Command dispatch logic.
//!
//! Invariants:
//! - Commands that talk to the server receive the cancellation token.
//! - `payload` and `config path` run without configuration.

use anyhow::{Context, Result};

use crate::args::{Cli, Commands};
use crate::cancellation::CancellationToken;
use crate::commands;

/// Route the parsed CLI arguments to the matching command handler.
pub(crate) async fn run_command(
    cli: Cli,
    config: Option<logparse_config::Config>,
    cancel_token: &CancellationToken,
) -> Result<()> {
    match cli.command {
        Commands::Payload { filter } => commands::payload::run(&filter),
        Commands::Parse { filter } => {
            let config = config.context("configuration was not loaded")?;
            commands::parse::run(
                config,
                &filter,
                cli.metrics_bind.is_some(),
                cli.quiet,
                cancel_token,
            )
            .await
        }
        Commands::Config { command } => commands::config::run(command, config.as_ref()),
    }
}
