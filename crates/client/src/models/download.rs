//! Result of a successful parse request.

use std::path::PathBuf;

/// A parsed-log workbook written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadHandle {
    /// Where the file was written.
    pub path: PathBuf,
    /// Final file name (after collision handling).
    pub file_name: String,
    /// Number of bytes written.
    pub bytes_written: u64,
    /// `Content-Type` of the response, if the server sent one.
    pub content_type: Option<String>,
}
