//! Basic builder tests: defaults, overrides, URL normalization.

use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};
use crate::loader::builder::ConfigLoader;
use crate::loader::error::ConfigError;

#[test]
fn test_build_applies_defaults() {
    let config = ConfigLoader::new()
        .with_base_url("http://localhost:8080".to_string())
        .build()
        .unwrap();

    assert_eq!(config.connection.base_url, "http://localhost:8080");
    assert!(!config.connection.skip_verify);
    assert_eq!(
        config.connection.timeout,
        Duration::from_secs(DEFAULT_TIMEOUT_SECS)
    );
    assert_eq!(config.connection.max_retries, DEFAULT_MAX_RETRIES);
    assert_eq!(config.download.output_dir, PathBuf::from("."));
    assert!(!config.download.overwrite);
}

#[test]
fn test_builder_overrides() {
    let config = ConfigLoader::new()
        .with_base_url("https://logs.example.com/app".to_string())
        .with_skip_verify(true)
        .with_timeout(Duration::from_secs(45))
        .with_max_retries(0)
        .with_output_dir(PathBuf::from("/tmp/reports"))
        .with_overwrite(true)
        .build()
        .unwrap();

    assert_eq!(config.connection.base_url, "https://logs.example.com/app");
    assert!(config.connection.skip_verify);
    assert_eq!(config.connection.timeout, Duration::from_secs(45));
    assert_eq!(config.connection.max_retries, 0);
    assert_eq!(config.download.output_dir, PathBuf::from("/tmp/reports"));
    assert!(config.download.overwrite);
}

#[test]
fn test_missing_base_url() {
    let result = ConfigLoader::new().build();
    assert!(matches!(result, Err(ConfigError::MissingBaseUrl)));
}

#[test]
fn test_blank_base_url_is_missing() {
    let result = ConfigLoader::new().with_base_url("   ".to_string()).build();
    assert!(matches!(result, Err(ConfigError::MissingBaseUrl)));
}

#[test]
fn test_base_url_trailing_slash_removed() {
    let config = ConfigLoader::new()
        .with_base_url("http://localhost:8080/logparser/".to_string())
        .build()
        .unwrap();
    assert_eq!(config.connection.base_url, "http://localhost:8080/logparser");
}

#[test]
fn test_base_url_rejects_other_schemes() {
    let result = ConfigLoader::new()
        .with_base_url("ftp://localhost".to_string())
        .build();
    match result {
        Err(ConfigError::InvalidValue { var, message }) => {
            assert_eq!(var, "base_url");
            assert!(message.contains("ftp"), "unexpected message: {}", message);
        }
        other => panic!("Expected InvalidValue, got {:?}", other),
    }
}

#[test]
fn test_base_url_rejects_relative() {
    let result = ConfigLoader::new()
        .with_base_url("parseLogFile".to_string())
        .build();
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}
