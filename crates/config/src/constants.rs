//! Centralized constants for the log parse client workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
///
/// Parsing a large log on the server can take minutes before the first byte
/// of the generated workbook is sent back.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Maximum allowed request timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Default maximum number of retries for transient failures (429, 502-504).
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Upper bound accepted for the retry setting.
pub const MAX_MAX_RETRIES: usize = 10;

/// Default base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

// =============================================================================
// Download Defaults
// =============================================================================

/// Default directory downloads are written to.
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// Extension of the workbook the server produces.
pub const OUTPUT_FILE_EXTENSION: &str = "xlsx";

/// File name used when neither the response nor the filter names the result.
pub const FALLBACK_OUTPUT_STEM: &str = "parsed-log";

// =============================================================================
// Files & Environment
// =============================================================================

/// Application name used for the per-user config directory.
pub const APP_NAME: &str = "logparse";

/// Config file name inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.json";
