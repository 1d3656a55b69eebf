//! Tracing subscriber setup with optional OTLP span export.
//!
//! Logs always go to stderr through an `EnvFilter`ed `fmt` layer. With an
//! OTLP endpoint, spans are also exported over gRPC and the parse request
//! carries the current span as a W3C `traceparent` header.

use std::time::Duration;

use opentelemetry::KeyValue;
use opentelemetry::trace::TracerProvider;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const TRACER_NAME: &str = "logparse-client";

const EXPORT_TIMEOUT: Duration = Duration::from_secs(5);

/// What the process-wide subscriber should do.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    service_name: String,
    otlp_endpoint: Option<String>,
    default_filter: String,
}

impl TracingConfig {
    /// Logging to stderr only, filtered by `RUST_LOG` (default `warn`).
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            otlp_endpoint: None,
            default_filter: "warn".to_string(),
        }
    }

    /// Export spans to this OTLP gRPC endpoint as well.
    pub fn otlp_endpoint(mut self, endpoint: Option<String>) -> Self {
        self.otlp_endpoint = endpoint.filter(|e| !e.trim().is_empty());
        self
    }

    /// Filter used when `RUST_LOG` is unset or invalid.
    pub fn default_filter(mut self, directive: impl Into<String>) -> Self {
        self.default_filter = directive.into();
        self
    }

    /// Install the global subscriber.
    ///
    /// Keep the returned guard until exit; [`TracingGuard::shutdown`] flushes
    /// pending spans.
    pub fn init(&self) -> Result<TracingGuard, TracingError> {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.default_filter));

        let provider = self
            .otlp_endpoint
            .as_deref()
            .map(|endpoint| self.tracer_provider(endpoint))
            .transpose()?;
        let otel_layer = provider
            .as_ref()
            .map(|p| tracing_opentelemetry::layer().with_tracer(p.tracer(TRACER_NAME)));

        tracing_subscriber::registry()
            .with(env_filter)
            .with(otel_layer)
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()?;

        Ok(TracingGuard { provider })
    }

    fn tracer_provider(&self, endpoint: &str) -> Result<SdkTracerProvider, TracingError> {
        use opentelemetry_otlp::WithExportConfig;

        let exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint)
            .with_timeout(EXPORT_TIMEOUT)
            .build()
            .map_err(|e| TracingError::Exporter(e.to_string()))?;

        let resource = opentelemetry_sdk::Resource::builder()
            .with_attributes([
                KeyValue::new("service.name", self.service_name.clone()),
                KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
            ])
            .build();

        Ok(SdkTracerProvider::builder()
            .with_batch_exporter(exporter)
            .with_resource(resource)
            .build())
    }
}

/// Holds the span exporter, if any, for the life of the process.
pub struct TracingGuard {
    provider: Option<SdkTracerProvider>,
}

impl TracingGuard {
    /// Flush and stop the span exporter.
    pub fn shutdown(self) {
        if let Some(provider) = self.provider
            && let Err(e) = provider.shutdown()
        {
            eprintln!("Failed to flush traces: {e}");
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Failed to build OTLP exporter: {0}")]
    Exporter(String),

    #[error("A global tracing subscriber is already installed")]
    AlreadyInstalled(#[from] tracing_subscriber::util::TryInitError),
}

/// Add W3C trace context headers for the current span to a request.
///
/// Adds nothing when no OpenTelemetry layer is active.
pub fn inject_trace_context(builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    use opentelemetry::propagation::TextMapPropagator;
    use opentelemetry_sdk::propagation::TraceContextPropagator;
    use std::collections::HashMap;
    use tracing_opentelemetry::OpenTelemetrySpanExt;

    let mut headers = HashMap::new();
    TraceContextPropagator::new()
        .inject_context(&tracing::Span::current().context(), &mut headers);

    headers
        .into_iter()
        .fold(builder, |builder, (key, value)| builder.header(key, value))
}
