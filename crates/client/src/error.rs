//! Error types for the log parse client.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors produced while unwrapping a failure response envelope.
///
/// The server reports failures as an XML document whose first `<pre>`
/// element holds a JSON object with an `error` string. Each way that shape
/// can be violated has its own variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeError {
    /// The body is not well-formed XML.
    #[error("malformed XML in error response: {0}")]
    MalformedXml(String),

    /// No `<pre>` element was found.
    #[error("error response has no <pre> element")]
    MissingPre,

    /// The `<pre>` element has no text content.
    #[error("<pre> element in error response is empty")]
    EmptyPre,

    /// The `<pre>` text is not valid JSON.
    #[error("<pre> content is not valid JSON: {0}")]
    InvalidJson(String),

    /// The JSON object has no string `error` field.
    #[error("error payload has no string \"error\" field")]
    MissingErrorField,
}

/// Coarse classification of a [`ClientError`], for presentation layers
/// that want to treat kinds differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network or HTTP failure before (or while) reading the response.
    Transport,
    /// The server returned a well-formed error envelope.
    ServerReported,
    /// The server's failure response could not be unwrapped.
    EnvelopeParse,
    /// The request was rejected locally before sending.
    Validation,
    /// Writing the downloaded file failed.
    LocalIo,
    /// A submission is already running.
    Busy,
}

/// Errors that can occur during log parse client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Error message reported by the server inside the error envelope.
    #[error("Server error ({status}): {message}")]
    ServerReported { status: u16, message: String },

    /// The failure response did not match the expected envelope.
    #[error("Could not parse server error response: {0}")]
    EnvelopeParse(#[from] EnvelopeError),

    /// The filter failed local validation.
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// Invalid or missing base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Writing the downloaded file failed.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A parse request is already in flight for this form.
    #[error("A parse request is already in progress")]
    SubmissionInProgress,

    /// Maximum retries exceeded on transient statuses.
    #[error("Maximum retries exceeded ({0} attempts)")]
    MaxRetriesExceeded(usize),

    /// The server kept answering 429 until retries ran out.
    #[error("Rate limited by server ({0} attempts)")]
    RateLimited(usize),
}

impl ClientError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) | Self::MaxRetriesExceeded(_) | Self::RateLimited(_) => {
                ErrorKind::Transport
            }
            Self::ServerReported { .. } => ErrorKind::ServerReported,
            Self::EnvelopeParse(_) => ErrorKind::EnvelopeParse,
            Self::InvalidFilter(_) | Self::InvalidUrl(_) => ErrorKind::Validation,
            Self::Io { .. } => ErrorKind::LocalIo,
            Self::SubmissionInProgress => ErrorKind::Busy,
        }
    }

    /// Text to show the user.
    ///
    /// Server-reported errors surface the server's message verbatim; every
    /// other kind uses the `Display` form.
    pub fn user_message(&self) -> String {
        match self {
            Self::ServerReported { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Check if an HTTP status code is retryable.
    ///
    /// Retryable status codes:
    /// - 429: Too Many Requests (rate limiting)
    /// - 502: Bad Gateway (transient server error)
    /// - 503: Service Unavailable (transient server error)
    /// - 504: Gateway Timeout (transient server error)
    ///
    /// A 500 carries the server's error envelope and is never retried.
    pub fn is_retryable_status(status: u16) -> bool {
        matches!(status, 429 | 502 | 503 | 504)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_reported_user_message_is_verbatim() {
        let err = ClientError::ServerReported {
            status: 500,
            message: "disk full".to_string(),
        };
        assert_eq!(err.user_message(), "disk full");
        assert_eq!(err.kind(), ErrorKind::ServerReported);
        assert_eq!(err.to_string(), "Server error (500): disk full");
    }

    #[test]
    fn test_envelope_errors_are_distinct_kind() {
        let err = ClientError::from(EnvelopeError::MissingPre);
        assert_eq!(err.kind(), ErrorKind::EnvelopeParse);
        assert!(err.user_message().contains("<pre>"));
    }

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            ClientError::InvalidFilter("x".into()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(ClientError::SubmissionInProgress.kind(), ErrorKind::Busy);
        assert_eq!(
            ClientError::MaxRetriesExceeded(4).kind(),
            ErrorKind::Transport
        );
        let io = ClientError::Io {
            path: PathBuf::from("/tmp/out.xlsx"),
            source: std::io::Error::other("denied"),
        };
        assert_eq!(io.kind(), ErrorKind::LocalIo);
        assert!(io.to_string().contains("/tmp/out.xlsx"));
    }

    #[test]
    fn test_is_retryable_status() {
        for status in [429, 502, 503, 504] {
            assert!(ClientError::is_retryable_status(status));
        }
        for status in [200, 400, 404, 500, 501] {
            assert!(!ClientError::is_retryable_status(status));
        }
    }
}
