//! Filter options sent with a parse request.
//!
//! # Invariants
//! - `is_gather_messages` is only meaningful when `is_uniq_records` is set;
//!   [`FilterConfig::enforce_gather_invariant`] restores this after edits.
//! - Unset optional fields serialize as JSON `null`.

use logparse_config::constants::{FALLBACK_OUTPUT_STEM, OUTPUT_FILE_EXTENSION};
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};

/// User-chosen options controlling how the server parses a log file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterConfig {
    /// Server-side directory (or file directory when `file_name` is set).
    pub file_path: Option<String>,
    /// Name of the log file inside `file_path`. When absent the server
    /// parses every file in `file_path`.
    pub file_name: Option<String>,
    /// First row to include (inclusive).
    pub start_row: Option<i64>,
    /// Last row to include (inclusive).
    pub finish_row: Option<i64>,
    /// Collapse identical records.
    pub is_uniq_records: bool,
    /// Group records whose messages differ only in variable values.
    pub is_gather_messages: bool,
    /// Keep ERROR records only.
    pub is_errors_only: bool,
    /// Keep only application frames in stack traces.
    pub is_te_stack_trace_only: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            file_path: None,
            file_name: None,
            start_row: None,
            finish_row: None,
            is_uniq_records: true,
            is_gather_messages: false,
            is_errors_only: true,
            is_te_stack_trace_only: true,
        }
    }
}

impl FilterConfig {
    /// Clear `is_gather_messages` when `is_uniq_records` is off.
    pub fn enforce_gather_invariant(&mut self) {
        if !self.is_uniq_records {
            self.is_gather_messages = false;
        }
    }

    /// Check the row range before sending.
    pub fn validate(&self) -> Result<()> {
        if let Some(start) = self.start_row
            && start < 0
        {
            return Err(ClientError::InvalidFilter(format!(
                "startRow must not be negative (got {start})"
            )));
        }
        if let Some(finish) = self.finish_row
            && finish < 0
        {
            return Err(ClientError::InvalidFilter(format!(
                "finishRow must not be negative (got {finish})"
            )));
        }
        if let (Some(start), Some(finish)) = (self.start_row, self.finish_row)
            && start > finish
        {
            return Err(ClientError::InvalidFilter(format!(
                "startRow ({start}) is after finishRow ({finish})"
            )));
        }
        Ok(())
    }

    /// Serialize to the JSON text carried in the `data` form field.
    pub fn to_payload(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| ClientError::InvalidFilter(e.to_string()))
    }

    /// Name the server gives the generated workbook.
    ///
    /// `<fileName>.xlsx` for a single file, otherwise the last segment of
    /// `filePath` with `.xlsx` appended.
    pub fn output_file_name(&self) -> String {
        let stem = self
            .file_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .or_else(|| {
                self.file_path
                    .as_deref()
                    .and_then(|path| path.trim_end_matches('/').rsplit('/').next())
                    .map(str::trim)
                    .filter(|segment| !segment.is_empty())
            })
            .unwrap_or(FALLBACK_OUTPUT_STEM);
        format!("{stem}.{OUTPUT_FILE_EXTENSION}")
    }
}
