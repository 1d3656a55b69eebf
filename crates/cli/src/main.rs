//! logparse-cli - submit server log files for parsing from the command line.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Resolve configuration and drive the filter form through the client library.
//! - Map failures to structured exit codes.
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing so `.env` can provide clap defaults.
//! - Diagnostics go to stderr; stdout carries only command output.

mod args;
mod cancellation;
mod commands;
mod dispatch;
mod error;

use args::Cli;
use cancellation::{CancellationToken, is_cancelled_error, print_cancelled_message};
use clap::Parser;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt, error_message};
use logparse_config::{Config, ConfigError, ConfigLoader};

#[tokio::main]
async fn main() {
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    // Only errors reach stderr unless RUST_LOG asks for more.
    let tracing_guard = match logparse_client::TracingConfig::new("logparse-cli")
        .otlp_endpoint(cli.otlp_endpoint.clone())
        .default_filter("error")
        .init()
    {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize tracing: {}", e);
            std::process::exit(ExitCode::GeneralError.as_i32());
        }
    };

    if let Some(ref bind_addr) = cli.metrics_bind
        && let Err(e) = logparse_client::serve_metrics(bind_addr)
    {
        eprintln!("Failed to start metrics exporter: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let config = if cli.command.needs_config() {
        match load_config(&cli) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("Failed to load configuration: {}", e);
                std::process::exit(ExitCode::ValidationError.as_i32());
            }
        }
    } else {
        None
    };

    let cancel = CancellationToken::new();
    let cancel_clone = cancel.clone();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        cancel_clone.cancel();
    });

    let exit_code = match run_command(cli, config, &cancel).await {
        Ok(()) => ExitCode::Success,
        Err(e) if is_cancelled_error(&e) => {
            print_cancelled_message();
            ExitCode::Interrupted
        }
        Err(e) => {
            eprintln!("{}", error_message(&e));
            e.exit_code()
        }
    };

    tracing_guard.shutdown();

    std::process::exit(exit_code.as_i32());
}

/// Resolve configuration: defaults < config file < environment < flags.
fn load_config(cli: &Cli) -> Result<Config, ConfigError> {
    let mut loader = ConfigLoader::new();

    // Blank values fall back to LOGPARSE_CONFIG_PATH / the default location.
    if let Some(ref path) = cli.config_path
        && !path.to_string_lossy().trim().is_empty()
    {
        loader = loader.with_config_path(path.clone());
    }

    loader = loader.from_file()?.from_env()?;

    if let Some(ref url) = cli.base_url {
        loader = loader.with_base_url(url.clone());
    }
    if let Some(timeout_secs) = cli.timeout {
        loader = loader.with_timeout(std::time::Duration::from_secs(timeout_secs));
    }
    if let Some(retries) = cli.max_retries {
        loader = loader.with_max_retries(retries);
    }
    if cli.skip_verify {
        loader = loader.with_skip_verify(true);
    }
    if let Some(ref dir) = cli.output_dir {
        loader = loader.with_output_dir(dir.clone());
    }
    if cli.overwrite {
        loader = loader.with_overwrite(true);
    }

    loader.build()
}
