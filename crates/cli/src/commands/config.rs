//! Configuration commands.

use anyhow::{Context, Result};
use clap::Subcommand;
use logparse_config::Config;

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the resolved configuration as JSON
    Show,

    /// Print the default config file location
    Path,
}

pub fn run(command: ConfigCommand, config: Option<&Config>) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            let config = config.context("configuration was not loaded")?;
            let output = serde_json::to_string_pretty(config)
                .context("Failed to serialize configuration")?;
            println!("{}", output);
        }
        ConfigCommand::Path => {
            let path = logparse_config::default_config_path()?;
            println!("{}", path.display());
        }
    }
    Ok(())
}
