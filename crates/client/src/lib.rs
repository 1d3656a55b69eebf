//! Client for submitting log files to the log parser web application.
//!
//! The [`FilterFormController`] holds the user's [`FilterConfig`] and submits
//! it through a [`ParseRequestAdapter`]. [`LogParserClient`] is the HTTP
//! adapter: it POSTs the filter to `parseLogFile`, saves the resulting
//! workbook, and unwraps the server's error envelope on failure.

pub mod adapter;
pub mod client;
pub mod controller;
pub mod endpoints;
pub mod error;
pub mod metrics;
pub mod metrics_exporter;
pub mod models;
pub mod telemetry;

pub use adapter::ParseRequestAdapter;
pub use client::LogParserClient;
pub use client::builder::LogParserClientBuilder;
pub use controller::{BusyFlag, FilterFormController, Notification, NotificationLevel};
pub use endpoints::{DownloadTarget, extract_error_message};
pub use error::{ClientError, EnvelopeError, ErrorKind, Result};
pub use metrics::{ErrorCategory, MetricsCollector};
pub use metrics_exporter::{MetricsExporterError, serve_metrics};
pub use models::{DownloadHandle, FilterConfig};
pub use telemetry::{TracingConfig, TracingError, TracingGuard};
