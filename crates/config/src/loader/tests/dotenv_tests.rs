//! Tests for dotenv loading behavior.
//!
//! Responsibilities:
//! - Test that missing `.env` files are silently ignored.
//! - Test that invalid `.env` files return errors without echoing file content.
//! - Test that `DOTENV_DISABLED=1`/`true` skips dotenv loading.
//!
//! Invariants / Assumptions:
//! - Tests use `env_lock()` and `#[serial]` to prevent cross-test contamination.
//! - Tests must serialize mutations to process-global state (cwd/env).

use std::fs;
use std::path::PathBuf;

use serial_test::serial;
use tempfile::TempDir;

use super::env_lock;
use crate::loader::builder::ConfigLoader;
use crate::loader::error::ConfigError;

/// RAII guard for temporarily changing the current working directory.
struct CwdGuard {
    original_dir: PathBuf,
}

impl CwdGuard {
    fn new(temp_dir: &TempDir) -> Self {
        let original_dir = std::env::current_dir().expect("Failed to get current directory");
        std::env::set_current_dir(temp_dir.path()).expect("Failed to set current directory");
        Self { original_dir }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original_dir);
    }
}

#[test]
#[serial]
fn test_missing_dotenv_is_ok() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let _cwd_guard = CwdGuard::new(&temp_dir);

    temp_env::with_var("DOTENV_DISABLED", None::<&str>, || {
        assert!(
            ConfigLoader::new().load_dotenv().is_ok(),
            "Missing .env file should be silently ignored"
        );
    });
}

#[test]
#[serial]
fn test_valid_dotenv_is_ok() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let _cwd_guard = CwdGuard::new(&temp_dir);

    fs::write(
        temp_dir.path().join(".env"),
        "LOGPARSE_DOTENV_TEST_MARKER=loaded\n",
    )
    .unwrap();

    temp_env::with_vars(
        [
            ("DOTENV_DISABLED", None::<&str>),
            ("LOGPARSE_DOTENV_TEST_MARKER", None),
        ],
        || {
            assert!(ConfigLoader::new().load_dotenv().is_ok());
            assert_eq!(
                std::env::var("LOGPARSE_DOTENV_TEST_MARKER").as_deref(),
                Ok("loaded")
            );
        },
    );
}

#[test]
#[serial]
fn test_invalid_dotenv_does_not_echo_contents() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let _cwd_guard = CwdGuard::new(&temp_dir);

    let marker = "private_value_12345";
    fs::write(
        temp_dir.path().join(".env"),
        format!("LOGPARSE_OUTPUT_DIR={}\nINVALID_LINE_WITHOUT_EQUALS", marker),
    )
    .unwrap();

    temp_env::with_vars(
        [
            ("DOTENV_DISABLED", None::<&str>),
            ("LOGPARSE_OUTPUT_DIR", None),
        ],
        || match ConfigLoader::new().load_dotenv() {
            Err(e @ ConfigError::DotenvParse { .. }) => {
                let message = e.to_string();
                assert!(!message.contains(marker), "leaked content: {}", message);
                assert!(message.contains("DOTENV_DISABLED"), "missing hint: {}", message);
            }
            Err(other) => panic!("Expected DotenvParse, got {}", other),
            Ok(_) => panic!("Expected DotenvParse, got Ok"),
        },
    );
}

#[test]
#[serial]
fn test_dotenv_disabled_skips_invalid_file() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let _cwd_guard = CwdGuard::new(&temp_dir);

    fs::write(temp_dir.path().join(".env"), "INVALID_LINE_WITHOUT_EQUALS").unwrap();

    for value in ["1", "true"] {
        temp_env::with_var("DOTENV_DISABLED", Some(value), || {
            assert!(
                ConfigLoader::new().load_dotenv().is_ok(),
                "DOTENV_DISABLED={} should skip .env loading",
                value
            );
        });
    }
}

#[test]
#[serial]
fn test_dotenv_disabled_other_values_not_disabled() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let _cwd_guard = CwdGuard::new(&temp_dir);

    fs::write(temp_dir.path().join(".env"), "INVALID_LINE_WITHOUT_EQUALS").unwrap();

    temp_env::with_var("DOTENV_DISABLED", Some("false"), || {
        assert!(matches!(
            ConfigLoader::new().load_dotenv(),
            Err(ConfigError::DotenvParse { .. })
        ));
    });
}
