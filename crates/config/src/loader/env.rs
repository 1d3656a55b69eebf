//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse `LOGPARSE_*` environment variables.
//! - Apply environment variable values to a ConfigLoader instance.
//!
//! Does NOT handle:
//! - Loading the config file (see file.rs).
//! - Building the final Config (see builder.rs).
//! - .env file loading (handled by ConfigLoader::load_dotenv).
//!
//! Invariants:
//! - Environment variables take precedence over config file settings.
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid values return ConfigError::InvalidValue.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::constants::MAX_MAX_RETRIES;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_env<T: FromStr>(key: &str, expected: &str) -> Result<Option<T>, ConfigError> {
    env_var_or_none(key)
        .map(|raw| {
            raw.parse().map_err(|_| ConfigError::InvalidValue {
                var: key.to_string(),
                message: expected.to_string(),
            })
        })
        .transpose()
}

/// Apply the config file path override from the environment, unless one was
/// already set explicitly.
pub fn apply_config_path_env(loader: &mut ConfigLoader) {
    if loader.config_path().is_none()
        && let Some(path) = env_var_or_none("LOGPARSE_CONFIG_PATH")
    {
        loader.set_config_path(Some(PathBuf::from(path)));
    }
}

/// Apply environment variable configuration to the loader.
///
/// Environment variables take precedence over config file settings.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(url) = env_var_or_none("LOGPARSE_BASE_URL") {
        loader.set_base_url(Some(url));
    }
    if let Some(skip) = parse_env::<bool>("LOGPARSE_SKIP_VERIFY", "must be true or false")? {
        loader.set_skip_verify(Some(skip));
    }
    if let Some(secs) = parse_env::<u64>("LOGPARSE_TIMEOUT", "must be a number")? {
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(value) =
        parse_env::<usize>("LOGPARSE_MAX_RETRIES", "must be a non-negative integer")?
    {
        if value > MAX_MAX_RETRIES {
            return Err(ConfigError::InvalidMaxRetries {
                message: format!("must be between 0 and {} (got {})", MAX_MAX_RETRIES, value),
            });
        }
        loader.set_max_retries(Some(value));
    }
    if let Some(dir) = env_var_or_none("LOGPARSE_OUTPUT_DIR") {
        loader.set_output_dir(Some(PathBuf::from(dir)));
    }
    if let Some(overwrite) = parse_env::<bool>("LOGPARSE_OVERWRITE", "must be true or false")? {
        loader.set_overwrite(Some(overwrite));
    }
    Ok(())
}
