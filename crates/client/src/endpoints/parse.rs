//! The `parseLogFile` action.
//!
//! # Invariants
//! - The filter is validated before any request is sent.
//! - A response is a failure when its status is not 2xx or it sets the
//!   `fileDownload=false` cookie; failure bodies are never written to disk.

use reqwest::header::SET_COOKIE;
use reqwest::{Client, Response};
use tracing::{debug, info, warn};

use crate::endpoints::download::{DownloadTarget, save_response};
use crate::endpoints::{extract_error_message, send_request_with_retry};
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::{DownloadHandle, FilterConfig};
use crate::telemetry::inject_trace_context;

/// Path of the parse action relative to the base URL.
pub const PARSE_ENDPOINT: &str = "parseLogFile";

/// Value of the `actionName` query parameter.
pub const ACTION_NAME: &str = "parseLogFile";

/// Form field carrying the JSON filter.
pub const FORM_FIELD: &str = "data";

/// Cookie the server sets when the download did not happen.
const DOWNLOAD_FAILED_COOKIE: &str = "fileDownload=false";

/// Submit a parse request and save the resulting workbook.
///
/// # Errors
///
/// - [`ClientError::InvalidFilter`] before sending, for an invalid filter.
/// - [`ClientError::ServerReported`] when the server returns an error envelope.
/// - [`ClientError::EnvelopeParse`] when the failure body cannot be unwrapped.
/// - [`ClientError::Transport`] / [`ClientError::MaxRetriesExceeded`] on
///   network failures.
/// - [`ClientError::Io`] when writing the file fails.
#[tracing::instrument(skip_all, fields(file_name = filter.file_name.as_deref()))]
pub async fn parse_log_file(
    client: &Client,
    base_url: &str,
    filter: &FilterConfig,
    target: &DownloadTarget,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<DownloadHandle> {
    let result = submit(client, base_url, filter, target, max_retries, metrics).await;
    if let (Err(e), Some(m)) = (&result, metrics) {
        m.record_client_error(PARSE_ENDPOINT, "POST", e);
    }
    result
}

async fn submit(
    client: &Client,
    base_url: &str,
    filter: &FilterConfig,
    target: &DownloadTarget,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<DownloadHandle> {
    filter.validate()?;
    let payload = filter.to_payload()?;

    let url = format!("{}/{}", base_url, PARSE_ENDPOINT);
    debug!(%url, payload_len = payload.len(), "Submitting parse request");

    let builder = client
        .post(&url)
        .query(&[("actionName", ACTION_NAME)])
        .form(&[(FORM_FIELD, payload.as_str())]);
    let builder = inject_trace_context(builder);

    let response = send_request_with_retry(builder, max_retries, PARSE_ENDPOINT, metrics).await?;

    if is_failure(&response) {
        return Err(failure_from_response(response).await);
    }

    let handle = save_response(response, target, &filter.output_file_name()).await?;
    if let Some(m) = metrics {
        m.record_download_bytes(PARSE_ENDPOINT, handle.bytes_written);
    }
    info!(
        path = %handle.path.display(),
        bytes = handle.bytes_written,
        "Parsed log downloaded"
    );
    Ok(handle)
}

/// Whether the response reports a failed parse.
pub fn is_failure(response: &Response) -> bool {
    !response.status().is_success()
        || response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .any(sets_download_failed)
}

fn sets_download_failed(cookie: &str) -> bool {
    cookie
        .split(';')
        .next()
        .is_some_and(|pair| pair.trim().eq_ignore_ascii_case(DOWNLOAD_FAILED_COOKIE))
}

async fn failure_from_response(response: Response) -> ClientError {
    let status = response.status().as_u16();
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => return ClientError::Transport(e),
    };

    match extract_error_message(&body) {
        Ok(message) => {
            warn!(status, %message, "Server rejected parse request");
            ClientError::ServerReported { status, message }
        }
        Err(e) => {
            warn!(status, error = %e, body_len = body.len(), "Unreadable error response");
            ClientError::EnvelopeParse(e)
        }
    }
}
