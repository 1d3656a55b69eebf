//! Retry helper for HTTP requests with exponential backoff.
//!
//! This module retries requests that fail with a transient status
//! (429, 502, 503, 504), using exponential backoff between attempts.
//! Every other response, successful or not, is handed back to the caller.

use reqwest::{RequestBuilder, Response};
use std::time::Instant;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;

/// Sends an HTTP request with automatic retry on transient statuses.
///
/// - Implements exponential backoff (1s, 2s, 4s = 2^attempt)
/// - Logs retry attempts with `tracing::debug`
/// - Returns `MaxRetriesExceeded` when retries are exhausted
///
/// `max_retries = 0` sends the request exactly once.
///
/// # Errors
///
/// Returns `ClientError::MaxRetriesExceeded` when all retry attempts are exhausted,
/// or `ClientError::RateLimited` when the last attempt was answered with 429.
/// Propagates transport failures as `ClientError::Transport`.
pub async fn send_request_with_retry(
    builder: RequestBuilder,
    max_retries: usize,
    endpoint: &str,
    metrics: Option<&MetricsCollector>,
) -> Result<Response> {
    let mut last_status = None;
    for attempt in 0..=max_retries {
        let attempt_builder = match builder.try_clone() {
            Some(cloned) => cloned,
            None => {
                debug!("Request builder cannot be cloned, single attempt only");
                return send_once(builder, endpoint, metrics).await;
            }
        };

        if attempt > 0
            && let Some(m) = metrics
        {
            m.record_retry(endpoint, "POST", attempt);
        }

        let response = send_once(attempt_builder, endpoint, metrics).await?;
        let status = response.status().as_u16();
        last_status = Some(status);

        if !ClientError::is_retryable_status(status) {
            if attempt > 0 {
                debug!(attempt = attempt + 1, "Request succeeded after retry");
            }
            return Ok(response);
        }

        if attempt < max_retries {
            let backoff_secs = 2u64.pow(attempt as u32);
            debug!(
                attempt = attempt + 1,
                max_retries = max_retries + 1,
                backoff_secs = backoff_secs,
                status = status,
                "Transient status, retrying with exponential backoff"
            );
            tokio::time::sleep(tokio::time::Duration::from_secs(backoff_secs)).await;
        } else {
            debug!(
                attempts = attempt + 1,
                status = status,
                "Max retries exhausted for transient status"
            );
        }
    }

    if last_status == Some(429) {
        return Err(ClientError::RateLimited(max_retries + 1));
    }
    Err(ClientError::MaxRetriesExceeded(max_retries + 1))
}

async fn send_once(
    builder: RequestBuilder,
    endpoint: &str,
    metrics: Option<&MetricsCollector>,
) -> Result<Response> {
    if let Some(m) = metrics {
        m.record_request(endpoint, "POST");
    }
    let started = Instant::now();
    let result = builder.send().await;
    if let Some(m) = metrics {
        let status = result.as_ref().ok().map(|r| r.status().as_u16());
        m.record_request_duration(endpoint, "POST", started.elapsed(), status);
    }
    result.map_err(ClientError::from)
}
