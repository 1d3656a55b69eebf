//! JSON config file loading.
//!
//! Responsibilities:
//! - Resolve the default config file location.
//! - Read the optional JSON config file and apply its values to a `ConfigLoader`.
//!
//! Does NOT handle:
//! - Environment variable parsing (see env.rs).
//! - Building the final Config (see builder.rs).
//!
//! Invariants:
//! - File values are applied before environment variables (env vars take precedence).
//! - A missing file at the default location is not an error; a missing file at an
//!   explicitly configured path is.
//! - Every key in the file is optional.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::constants::{APP_NAME, CONFIG_FILE_NAME};

/// On-disk representation of the config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ConfigFile {
    pub base_url: Option<String>,
    pub skip_verify: Option<bool>,
    pub timeout_seconds: Option<u64>,
    pub max_retries: Option<usize>,
    pub output_dir: Option<PathBuf>,
    pub overwrite: Option<bool>,
}

/// Returns the default path of the config file (`<config dir>/logparse/config.json`).
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        directories::ProjectDirs::from("", "", APP_NAME).ok_or(ConfigError::ConfigDirUnavailable)?;
    Ok(proj_dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Read and parse a config file.
pub(crate) fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ConfigFileRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ConfigError::ConfigFileParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Apply the config file to the loader.
pub fn apply_file(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    let (path, explicit) = match loader.config_path() {
        Some(path) => (path.clone(), true),
        None => match default_config_path() {
            Ok(path) => (path, false),
            Err(e) => {
                tracing::debug!("Skipping config file: {}", e);
                return Ok(());
            }
        },
    };

    if !path.exists() {
        if explicit {
            return Err(ConfigError::ConfigFileMissing { path });
        }
        tracing::debug!(path = %path.display(), "No config file at default location");
        return Ok(());
    }

    let file = read_config_file(&path)?;
    tracing::debug!(path = %path.display(), "Loaded config file");

    if file.base_url.is_some() {
        loader.set_base_url(file.base_url);
    }
    if file.skip_verify.is_some() {
        loader.set_skip_verify(file.skip_verify);
    }
    if let Some(secs) = file.timeout_seconds {
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if file.max_retries.is_some() {
        loader.set_max_retries(file.max_retries);
    }
    if file.output_dir.is_some() {
        loader.set_output_dir(file.output_dir);
    }
    if file.overwrite.is_some() {
        loader.set_overwrite(file.overwrite);
    }
    Ok(())
}
