//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map ClientError variants to appropriate exit codes.
//!
//! Invariants:
//! - Exit codes 1-9 are reserved for specific error categories.
//! - Exit code 130 is reserved for SIGINT (Unix standard: 128 + SIGINT).

use logparse_client::ClientError;
use logparse_config::ConfigError;

/// Structured exit codes for logparse-cli.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Transport error - connection refused, DNS, timeout, TLS, or retries exhausted.
    ///
    /// Scripts may retry with exponential backoff.
    TransportError = 3,

    /// The server rejected the request and explained why.
    ServerReported = 4,

    /// Validation error - bad filter, URL, or configuration value.
    ///
    /// Scripts should fix the input and not retry the same request.
    ValidationError = 5,

    /// The server's failure response could not be understood.
    EnvelopeError = 6,

    /// Rate limited - HTTP 429 until retries ran out.
    ///
    /// Scripts should back off and retry later.
    RateLimited = 7,

    /// The download could not be written locally.
    LocalIoError = 8,

    /// Interrupted - SIGINT/Ctrl+C (Unix standard: 128 + 2).
    Interrupted = 130,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::Transport(_) | ClientError::MaxRetriesExceeded(_) => {
                ExitCode::TransportError
            }
            ClientError::RateLimited(_) => ExitCode::RateLimited,
            ClientError::ServerReported { .. } => ExitCode::ServerReported,
            ClientError::EnvelopeParse(_) => ExitCode::EnvelopeError,
            ClientError::InvalidFilter(_) | ClientError::InvalidUrl(_) => {
                ExitCode::ValidationError
            }
            ClientError::Io { .. } => ExitCode::LocalIoError,
            ClientError::SubmissionInProgress => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Exit code for this error; `GeneralError` unless a known error type is
    /// found in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(client_err) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(client_err);
            }
            if cause.downcast_ref::<ConfigError>().is_some() {
                return ExitCode::ValidationError;
            }
        }
        ExitCode::GeneralError
    }
}

/// Text printed to stderr for a failed command.
///
/// Client errors show their user-facing message, so a server-reported
/// failure prints exactly what the server said.
pub fn error_message(err: &anyhow::Error) -> String {
    match err.chain().find_map(|c| c.downcast_ref::<ClientError>()) {
        Some(client_err) => format!("Error: {}", client_err.user_message()),
        None => format!("Error: {:#}", err),
    }
}
