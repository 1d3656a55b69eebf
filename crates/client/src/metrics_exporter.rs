//! Prometheus `/metrics` endpoint for the client metrics.

use std::net::{AddrParseError, SocketAddr};

use metrics_exporter_prometheus::{Matcher, PrometheusBuilder};
use tracing::info;

use crate::metrics::METRIC_REQUEST_DURATION;

/// Upper bounds in seconds for the request duration histogram. Parsing a
/// large log can keep a request open for minutes.
const REQUEST_DURATION_BUCKETS: &[f64] = &[
    0.05, 0.25, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0, 300.0,
];

/// Install the Prometheus recorder globally and serve `/metrics` on
/// `bind_addr`.
///
/// Must be called from within a Tokio runtime.
pub fn serve_metrics(bind_addr: &str) -> Result<SocketAddr, MetricsExporterError> {
    let addr: SocketAddr = bind_addr
        .parse()
        .map_err(|source| MetricsExporterError::InvalidBindAddress {
            addr: bind_addr.to_string(),
            source,
        })?;

    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(METRIC_REQUEST_DURATION.to_string()),
            REQUEST_DURATION_BUCKETS,
        )?
        .with_http_listener(addr)
        .install()?;

    info!(%addr, "Serving Prometheus metrics on /metrics");
    Ok(addr)
}

#[derive(Debug, thiserror::Error)]
pub enum MetricsExporterError {
    #[error("Invalid metrics bind address '{addr}': {source}")]
    InvalidBindAddress {
        addr: String,
        #[source]
        source: AddrParseError,
    },

    /// Recorder construction failed, or a recorder is already installed.
    #[error(transparent)]
    Prometheus(#[from] metrics_exporter_prometheus::BuildError),
}
