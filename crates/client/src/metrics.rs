//! Metrics collection for parse requests.
//!
//! Records request latency, attempt and retry counts, and failures labelled
//! by [`ErrorCategory`]. Exposition is handled separately by
//! [`crate::metrics_exporter`].
//!
//! # Invariants
//! - Labels are always `endpoint`, `method`, `status`, `error_category`.
//! - Recording never fails and is a no-op when no recorder is installed.

use crate::error::ClientError;
use std::time::Duration;

/// Metric name for request duration histogram.
pub const METRIC_REQUEST_DURATION: &str = "logparse_request_duration_seconds";

/// Metric name for total request counter.
pub const METRIC_REQUESTS_TOTAL: &str = "logparse_requests_total";

/// Metric name for retry counter.
pub const METRIC_RETRIES_TOTAL: &str = "logparse_retries_total";

/// Metric name for error counter.
pub const METRIC_ERRORS_TOTAL: &str = "logparse_errors_total";

/// Metric name for downloaded bytes counter.
pub const METRIC_DOWNLOAD_BYTES: &str = "logparse_download_bytes_total";

/// Error categories for metrics labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Connection refused, DNS, TLS, exhausted retries.
    Transport,
    /// The server returned a well-formed error envelope.
    ServerReported,
    /// The failure body could not be unwrapped.
    Envelope,
    /// Request timed out.
    Timeout,
    /// Filter or URL rejected locally.
    Validation,
    /// Writing the download failed.
    Io,
    /// Anything else.
    Unknown,
}

impl ErrorCategory {
    /// Returns the string label for this error category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Transport => "transport",
            ErrorCategory::ServerReported => "server_reported",
            ErrorCategory::Envelope => "envelope",
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::Validation => "validation",
            ErrorCategory::Io => "io",
            ErrorCategory::Unknown => "unknown",
        }
    }
}

impl From<&ClientError> for ErrorCategory {
    fn from(error: &ClientError) -> Self {
        match error {
            ClientError::Transport(e) if e.is_timeout() => ErrorCategory::Timeout,
            ClientError::Transport(_)
            | ClientError::MaxRetriesExceeded(_)
            | ClientError::RateLimited(_) => ErrorCategory::Transport,
            ClientError::ServerReported { .. } => ErrorCategory::ServerReported,
            ClientError::EnvelopeParse(_) => ErrorCategory::Envelope,
            ClientError::InvalidFilter(_) | ClientError::InvalidUrl(_) => {
                ErrorCategory::Validation
            }
            ClientError::Io { .. } => ErrorCategory::Io,
            ClientError::SubmissionInProgress => ErrorCategory::Unknown,
        }
    }
}

/// Thin wrapper around the `metrics` macros with consistent labels.
///
/// ```rust,ignore
/// use logparse_client::metrics::MetricsCollector;
///
/// let collector = MetricsCollector::new();
/// collector.record_request_duration("parseLogFile", "POST", Duration::from_millis(150), Some(200));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    enabled: bool,
}

impl MetricsCollector {
    /// Create an enabled collector.
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// Create a collector that records nothing.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Check if metrics collection is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record the duration of a request.
    ///
    /// `status` is `None` when the request failed before a response arrived.
    pub fn record_request_duration(
        &self,
        endpoint: &str,
        method: &str,
        duration: Duration,
        status: Option<u16>,
    ) {
        if !self.enabled {
            return;
        }

        let status_label = status.map_or("error".to_string(), |s| s.to_string());

        metrics::histogram!(METRIC_REQUEST_DURATION,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "status" => status_label,
        )
        .record(duration.as_secs_f64());
    }

    /// Record a request attempt, retries included.
    pub fn record_request(&self, endpoint: &str, method: &str) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_REQUESTS_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
        )
        .increment(1);
    }

    /// Record a retry attempt (`attempt` is 1-based).
    pub fn record_retry(&self, endpoint: &str, method: &str, attempt: usize) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_RETRIES_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "attempt" => attempt.to_string(),
        )
        .increment(1);
    }

    /// Record an error.
    pub fn record_error(&self, endpoint: &str, method: &str, category: ErrorCategory) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_ERRORS_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "error_category" => category.as_str(),
        )
        .increment(1);
    }

    /// Record an error, categorizing it automatically.
    pub fn record_client_error(&self, endpoint: &str, method: &str, error: &ClientError) {
        let category = ErrorCategory::from(error);
        self.record_error(endpoint, method, category);
    }

    /// Record the size of a completed download.
    pub fn record_download_bytes(&self, endpoint: &str, bytes: u64) {
        if !self.enabled {
            return;
        }
        metrics::counter!(METRIC_DOWNLOAD_BYTES,
            "endpoint" => endpoint.to_string(),
        )
        .increment(bytes);
    }
}
