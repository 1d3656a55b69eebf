//! Validation tests for timeout and retry bounds.

use crate::constants::{MAX_MAX_RETRIES, MAX_TIMEOUT_SECS};
use crate::loader::builder::ConfigLoader;
use crate::loader::error::ConfigError;
use std::time::Duration;

fn loader() -> ConfigLoader {
    ConfigLoader::new().with_base_url("http://localhost:8080".to_string())
}

#[test]
fn test_timeout_zero_invalid() {
    match loader().with_timeout(Duration::from_secs(0)).build() {
        Err(ConfigError::InvalidTimeout { message }) => {
            assert!(
                message.contains("must be greater than 0"),
                "Expected message about timeout > 0, got: {}",
                message
            );
        }
        other => panic!("Expected InvalidTimeout, got {:?}", other),
    }
}

#[test]
fn test_timeout_exceeds_max_invalid() {
    match loader()
        .with_timeout(Duration::from_secs(MAX_TIMEOUT_SECS + 1))
        .build()
    {
        Err(ConfigError::InvalidTimeout { message }) => {
            assert!(message.contains("exceeds maximum"), "got: {}", message);
        }
        other => panic!("Expected InvalidTimeout, got {:?}", other),
    }
}

#[test]
fn test_timeout_at_max_valid() {
    let config = loader()
        .with_timeout(Duration::from_secs(MAX_TIMEOUT_SECS))
        .build()
        .unwrap();
    assert_eq!(config.connection.timeout.as_secs(), MAX_TIMEOUT_SECS);
}

#[test]
fn test_max_retries_bounds() {
    assert!(loader().with_max_retries(0).build().is_ok());
    assert!(loader().with_max_retries(MAX_MAX_RETRIES).build().is_ok());
    assert!(matches!(
        loader().with_max_retries(MAX_MAX_RETRIES + 1).build(),
        Err(ConfigError::InvalidMaxRetries { .. })
    ));
}
