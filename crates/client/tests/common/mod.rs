//! Common test utilities for integration tests.
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)

use std::collections::HashMap;

#[allow(unused_imports)]
pub use logparse_client::endpoints;
#[allow(unused_imports)]
pub use reqwest::Client;
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

use logparse_client::DownloadTarget;
use tempfile::TempDir;

/// A download target in a fresh temporary directory.
#[allow(dead_code)]
pub fn temp_target() -> (TempDir, DownloadTarget) {
    let dir = TempDir::new().expect("create temp dir");
    let target = DownloadTarget {
        dir: dir.path().to_path_buf(),
        overwrite: false,
    };
    (dir, target)
}

/// Decoded query string and form body of the only request the server saw.
#[allow(dead_code)]
pub async fn single_request_params(
    server: &MockServer,
) -> (HashMap<String, String>, HashMap<String, String>) {
    let requests = server
        .received_requests()
        .await
        .expect("request recording enabled");
    assert_eq!(requests.len(), 1, "expected exactly one request");
    let request = &requests[0];

    let query = request.url.query_pairs().into_owned().collect();
    let form = url::form_urlencoded::parse(&request.body)
        .into_owned()
        .collect();
    (query, form)
}

/// An XHTML error envelope as seen through a browser frame.
#[allow(dead_code)]
pub fn envelope(message: &str) -> String {
    format!(
        "<html><head><title>error</title></head><body><pre>{{\"error\":\"{}\"}}</pre></body></html>",
        message
    )
}
