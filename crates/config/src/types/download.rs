//! Download destination settings.
//!
//! Responsibilities:
//! - Define where parsed-log workbooks are written and whether existing
//!   files may be replaced.
//!
//! Does NOT handle:
//! - Writing files (see the client crate's download module).

use crate::constants::DEFAULT_OUTPUT_DIR;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where downloaded results go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Directory the result file is written into.
    pub output_dir: PathBuf,
    /// Replace an existing file with the same name instead of picking a
    /// numbered alternative.
    #[serde(default)]
    pub overwrite: bool,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            overwrite: false,
        }
    }
}
