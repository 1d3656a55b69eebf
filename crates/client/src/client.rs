//! HTTP client for the log parser web application.
//!
//! # Submodules
//! - [`builder`]: client construction and configuration
//! - `parse`: the parse-and-download call and its adapter binding
//!
//! # Invariants
//! - `base_url` never ends with a slash.
//! - Every request goes through [`crate::endpoints`], which owns retries and
//!   failure detection.

pub mod builder;
mod parse;

use crate::endpoints::DownloadTarget;
use crate::metrics::MetricsCollector;

/// Client for the `parseLogFile` action.
///
/// ```rust,ignore
/// use logparse_client::LogParserClient;
///
/// let client = LogParserClient::builder()
///     .base_url("http://localhost:8080/logparser".to_string())
///     .output_dir("/tmp/reports")
///     .build()?;
/// ```
#[derive(Debug)]
pub struct LogParserClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) max_retries: usize,
    pub(crate) download: DownloadTarget,
    pub(crate) metrics: Option<MetricsCollector>,
}

impl LogParserClient {
    /// Create a new client builder.
    pub fn builder() -> builder::LogParserClientBuilder {
        builder::LogParserClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Where downloads are written.
    pub fn download_target(&self) -> &DownloadTarget {
        &self.download
    }
}
