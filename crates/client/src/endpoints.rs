//! HTTP endpoint implementations.
//!
//! Free functions taking the `reqwest::Client` and base URL explicitly;
//! [`crate::client::LogParserClient`] wires them to its configuration.

mod download;
mod envelope;
mod parse;
mod request;

pub use download::{
    DownloadTarget, filename_from_disposition, reserve_path, sanitize_file_name, save_response,
};
pub use envelope::extract_error_message;
pub use parse::{ACTION_NAME, FORM_FIELD, PARSE_ENDPOINT, is_failure, parse_log_file};
pub use request::send_request_with_retry;
