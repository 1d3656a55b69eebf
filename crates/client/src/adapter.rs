//! The seam between the form controller and the transport.

use std::future::Future;

use crate::error::Result;
use crate::models::{DownloadHandle, FilterConfig};

/// Submits a parse request and delivers the resulting file.
///
/// [`crate::LogParserClient`] is the HTTP implementation; tests substitute
/// their own.
pub trait ParseRequestAdapter {
    /// Send `filter` to the server and save the result.
    ///
    /// Resolves to [`crate::ClientError::ServerReported`] with the server's
    /// message verbatim when the server rejects the request.
    fn parse_log_file(
        &self,
        filter: &FilterConfig,
    ) -> impl Future<Output = Result<DownloadHandle>> + Send;
}
