//! Client builder for constructing [`LogParserClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Validating the base URL and normalizing it (removing trailing slashes)
//! - Configuring the underlying HTTP client (timeouts, redirects, TLS verification)
//!
//! # Invariants
//! - `base_url` is required and must use the `http` or `https` scheme
//! - `skip_verify` only affects HTTPS connections; HTTP connections log a warning

use std::path::PathBuf;
use std::time::Duration;

use crate::client::LogParserClient;
use crate::endpoints::DownloadTarget;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use logparse_config::{
    Config,
    constants::{
        DEFAULT_MAX_REDIRECTS, DEFAULT_MAX_RETRIES, DEFAULT_OUTPUT_DIR, DEFAULT_TIMEOUT_SECS,
    },
};

/// Builder for creating a new [`LogParserClient`].
///
/// Everything except `base_url` has a default.
pub struct LogParserClientBuilder {
    base_url: Option<String>,
    skip_verify: bool,
    timeout: Duration,
    max_retries: usize,
    output_dir: PathBuf,
    overwrite: bool,
    metrics: Option<MetricsCollector>,
}

impl Default for LogParserClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            overwrite: false,
            metrics: None,
        }
    }
}

impl LogParserClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the web application, e.g.
    /// `http://localhost:8080/logparser`. Trailing slashes are removed.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set whether to skip TLS certificate verification.
    ///
    /// # Security Warning
    /// Only use this against servers with self-signed certificates you
    /// control.
    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = skip;
        self
    }

    /// Set the request timeout. Parsing large logs is slow; default is 120 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of retries for transient statuses.
    ///
    /// Default is 3 retries with exponential backoff (1s, 2s, 4s delays).
    pub fn max_retries(mut self, retries: usize) -> Self {
        self.max_retries = retries;
        self
    }

    /// Directory downloads are written into.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Replace existing files instead of picking a numbered name.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Set the metrics collector.
    pub fn metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Pre-configure the builder from loaded configuration.
    ///
    /// ```rust,ignore
    /// let config = ConfigLoader::new().from_env()?.build()?;
    /// let client = LogParserClient::builder().from_config(&config).build()?;
    /// ```
    pub fn from_config(mut self, config: &Config) -> Self {
        self.base_url = Some(config.connection.base_url.clone());
        self.skip_verify = config.connection.skip_verify;
        self.timeout = config.connection.timeout;
        self.max_retries = config.connection.max_retries;
        self.output_dir = config.download.output_dir.clone();
        self.overwrite = config.download.overwrite;
        self
    }

    /// Normalize a base URL by removing trailing slashes.
    ///
    /// - `"http://localhost:8080/logparser/"` -> `"http://localhost:8080/logparser"`
    /// - `"http://localhost:8080//"` -> `"http://localhost:8080"`
    fn normalize_base_url(url: String) -> String {
        url.trim().trim_end_matches('/').to_string()
    }

    /// Build the [`LogParserClient`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` is missing or not an
    /// http(s) URL, and [`ClientError::Transport`] if the HTTP client fails to
    /// build.
    pub fn build(self) -> Result<LogParserClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;
        let base_url = Self::normalize_base_url(base_url);

        let is_https = base_url.starts_with("https://");
        if !is_https && !base_url.starts_with("http://") {
            return Err(ClientError::InvalidUrl(format!(
                "base_url must start with http:// or https:// (got '{}')",
                base_url
            )));
        }

        let mut http_builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS));

        if self.skip_verify {
            if is_https {
                http_builder = http_builder.danger_accept_invalid_certs(true);
            } else {
                tracing::warn!(
                    "skip_verify=true has no effect on HTTP URLs. TLS verification only applies to HTTPS connections."
                );
            }
        }

        let http = http_builder.build()?;

        Ok(LogParserClient {
            http,
            base_url,
            max_retries: self.max_retries,
            download: DownloadTarget {
                dir: self.output_dir,
                overwrite: self.overwrite,
            },
            metrics: self.metrics,
        })
    }
}
