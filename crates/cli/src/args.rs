//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Turn filter flags into a [`FilterConfig`] the same way the form does.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not load configuration (see `main`). Connection and download
//!   flags carry no `env` fallback: the config loader owns `LOGPARSE_*`
//!   parsing so blank and malformed values behave the same everywhere.

use clap::{Args, Parser, Subcommand};
use logparse_client::FilterConfig;
use std::path::PathBuf;

use crate::commands;

#[derive(Parser)]
#[command(name = "logparse-cli")]
#[command(about = "Submit server log files for parsing and download the resulting workbook", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  logparse-cli parse --file /var/log/app/server.log\n  logparse-cli parse --file-path /var/log/app --start-row 100 --finish-row 500\n  logparse-cli payload --file-name server.log --gather-messages\n  logparse-cli config show\n\n\
Environment:\n  LOGPARSE_BASE_URL, LOGPARSE_TIMEOUT, LOGPARSE_MAX_RETRIES, LOGPARSE_SKIP_VERIFY,\n  \
LOGPARSE_OUTPUT_DIR, LOGPARSE_OVERWRITE and LOGPARSE_CONFIG_PATH are read by the config\n  \
loader; blank values count as unset and flags take precedence.\n"
)]
pub struct Cli {
    /// Base URL of the log parser web application (e.g., http://localhost:8080/logparser)
    #[arg(short, long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Maximum number of retries for transient failures
    #[arg(long, global = true)]
    pub max_retries: Option<usize>,

    /// Skip TLS certificate verification (for self-signed certificates)
    #[arg(long, global = true)]
    pub skip_verify: bool,

    /// Directory the parsed workbook is written into
    #[arg(short, long, global = true, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Replace an existing file instead of choosing a numbered name
    #[arg(long, global = true)]
    pub overwrite: bool,

    /// Path to a custom configuration file (overrides default location)
    #[arg(long, global = true, value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// OTLP endpoint for exporting traces (e.g., http://localhost:4317)
    #[arg(long, global = true, env = "LOGPARSE_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,

    /// Serve Prometheus metrics on this address (e.g., 127.0.0.1:9090)
    #[arg(long, global = true, value_name = "ADDR")]
    pub metrics_bind: Option<String>,

    /// Do not print the path of the written file
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a log file on the server and download the result
    Parse {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Print the JSON payload `parse` would send, without contacting the server
    Payload {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Inspect the resolved configuration
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommand,
    },
}

impl Commands {
    /// Whether the command needs a resolved configuration.
    pub fn needs_config(&self) -> bool {
        !matches!(
            self,
            Commands::Payload { .. }
                | Commands::Config {
                    command: commands::config::ConfigCommand::Path
                }
        )
    }
}

/// Filter form fields.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Local path of the log file; its name becomes the file name and its
    /// directory the file path unless `--file-path` is given
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Directory of the log file(s) on the server
    #[arg(long, value_name = "DIR")]
    pub file_path: Option<String>,

    /// Name of the log file (overrides the name taken from `--file`)
    #[arg(long, value_name = "NAME")]
    pub file_name: Option<String>,

    /// First row to include
    #[arg(long, allow_negative_numbers = true)]
    pub start_row: Option<i64>,

    /// Last row to include
    #[arg(long, allow_negative_numbers = true)]
    pub finish_row: Option<i64>,

    /// Keep duplicate records
    #[arg(long)]
    pub no_uniq_records: bool,

    /// Group messages that differ only in variable values
    #[arg(long, conflicts_with = "no_uniq_records")]
    pub gather_messages: bool,

    /// Include all levels, not only ERROR
    #[arg(long)]
    pub all_levels: bool,

    /// Keep full stack traces
    #[arg(long)]
    pub all_stack_traces: bool,
}

impl FilterArgs {
    /// Flags that are not driven by the file chooser.
    pub fn base_filter(&self) -> FilterConfig {
        FilterConfig {
            file_path: self.file_path.clone().or_else(|| {
                self.file
                    .as_deref()
                    .and_then(|p| p.parent())
                    .map(|p| p.to_string_lossy().into_owned())
                    .filter(|p| !p.is_empty())
            }),
            file_name: None,
            start_row: self.start_row,
            finish_row: self.finish_row,
            is_uniq_records: !self.no_uniq_records,
            is_gather_messages: self.gather_messages,
            is_errors_only: !self.all_levels,
            is_te_stack_trace_only: !self.all_stack_traces,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_match_form_defaults() {
        let filter = FilterArgs::default().base_filter();
        assert_eq!(filter, FilterConfig::default());
    }

    #[test]
    fn test_file_parent_becomes_file_path() {
        let args = FilterArgs {
            file: Some(PathBuf::from("/var/log/app/server.log")),
            ..FilterArgs::default()
        };
        assert_eq!(args.base_filter().file_path.as_deref(), Some("/var/log/app"));

        let relative = FilterArgs {
            file: Some(PathBuf::from("server.log")),
            ..FilterArgs::default()
        };
        assert_eq!(relative.base_filter().file_path, None);
    }

    #[test]
    fn test_explicit_file_path_wins() {
        let args = FilterArgs {
            file: Some(PathBuf::from("/tmp/server.log")),
            file_path: Some("/srv/logs".to_string()),
            ..FilterArgs::default()
        };
        assert_eq!(args.base_filter().file_path.as_deref(), Some("/srv/logs"));
    }

    #[test]
    fn test_gather_conflicts_with_no_uniq() {
        let result = Cli::try_parse_from([
            "logparse-cli",
            "payload",
            "--no-uniq-records",
            "--gather-messages",
        ]);
        assert!(result.is_err());
    }
}
