//! Environment variable tests for the configuration loader builder.
//!
//! Responsibilities:
//! - Test that `LOGPARSE_*` variables are applied and override the config file.
//! - Test handling of empty and whitespace-only environment variables.
//! - Test invalid values are reported with the variable name.

use crate::loader::builder::ConfigLoader;
use crate::loader::env::env_var_or_none;
use crate::loader::error::ConfigError;
use serial_test::serial;
use std::path::PathBuf;
use std::time::Duration;

use super::env_lock;
use super::file_tests::write_config_file;
use tempfile::TempDir;

#[test]
#[serial]
fn test_env_values_applied() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_vars(
        [
            ("LOGPARSE_BASE_URL", Some("http://env.example.com:8080")),
            ("LOGPARSE_TIMEOUT", Some("90")),
            ("LOGPARSE_MAX_RETRIES", Some("1")),
            ("LOGPARSE_SKIP_VERIFY", Some("true")),
            ("LOGPARSE_OUTPUT_DIR", Some("/var/tmp/reports")),
            ("LOGPARSE_OVERWRITE", Some("true")),
        ],
        || {
            let config = ConfigLoader::new().from_env().unwrap().build().unwrap();
            assert_eq!(config.connection.base_url, "http://env.example.com:8080");
            assert_eq!(config.connection.timeout, Duration::from_secs(90));
            assert_eq!(config.connection.max_retries, 1);
            assert!(config.connection.skip_verify);
            assert_eq!(config.download.output_dir, PathBuf::from("/var/tmp/reports"));
            assert!(config.download.overwrite);
        },
    );
}

#[test]
#[serial]
fn test_env_overrides_config_file() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_config_file(
        temp_dir.path(),
        r#"{"base_url": "http://file.example.com", "timeout_seconds": 10}"#,
    );

    temp_env::with_vars(
        [
            ("LOGPARSE_BASE_URL", Some("http://override.example.com")),
            ("LOGPARSE_CONFIG_PATH", None),
        ],
        || {
            let config = ConfigLoader::new()
                .with_config_path(config_path.clone())
                .from_file()
                .unwrap()
                .from_env()
                .unwrap()
                .build()
                .unwrap();
            assert_eq!(config.connection.base_url, "http://override.example.com");
            // Not overridden by env
            assert_eq!(config.connection.timeout, Duration::from_secs(10));
        },
    );
}

#[test]
#[serial]
fn test_builder_overrides_env() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_vars([("LOGPARSE_BASE_URL", Some("http://env.example.com"))], || {
        let config = ConfigLoader::new()
            .from_env()
            .unwrap()
            .with_base_url("http://cli.example.com".to_string())
            .build()
            .unwrap();
        assert_eq!(config.connection.base_url, "http://cli.example.com");
    });
}

#[test]
#[serial]
fn test_empty_env_vars_ignored() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_vars(
        [
            ("LOGPARSE_BASE_URL", Some("")),
            ("LOGPARSE_TIMEOUT", Some("   ")),
            ("LOGPARSE_OUTPUT_DIR", Some("")),
        ],
        || {
            let result = ConfigLoader::new().from_env().unwrap().build();
            assert!(matches!(result, Err(ConfigError::MissingBaseUrl)));
        },
    );
}

#[test]
#[serial]
fn test_invalid_timeout_env() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_var("LOGPARSE_TIMEOUT", Some("soon"), || {
        match ConfigLoader::new().from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "LOGPARSE_TIMEOUT"),
            other => panic!("Expected InvalidValue, got {:?}", other.map(|_| ())),
        }
    });
}

#[test]
#[serial]
fn test_max_retries_env_out_of_range() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_var("LOGPARSE_MAX_RETRIES", Some("99"), || {
        assert!(matches!(
            ConfigLoader::new().from_env(),
            Err(ConfigError::InvalidMaxRetries { .. })
        ));
    });
}

#[test]
#[serial]
fn test_env_var_or_none_trims() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_var("LOGPARSE_TEST_TRIM", Some("  value  "), || {
        assert_eq!(
            env_var_or_none("LOGPARSE_TEST_TRIM"),
            Some("value".to_string())
        );
    });
    temp_env::with_var("LOGPARSE_TEST_TRIM", Some(" \t "), || {
        assert_eq!(env_var_or_none("LOGPARSE_TEST_TRIM"), None);
    });
}
