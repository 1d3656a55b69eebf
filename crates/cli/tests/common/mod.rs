//! Shared test utilities for logparse-cli integration tests.
//!
//! Invariants / Assumptions:
//! - Every command built here is hermetic: no `.env`, no `LOGPARSE_*`
//!   variables from the host, and no config file at the default location.

use assert_cmd::Command;

/// Returns a hermetic `logparse-cli` command for integration testing.
pub fn logparse_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("logparse-cli");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");

    // Point the default config location somewhere empty
    cmd.env("HOME", "/nonexistent/logparse-test-home")
        .env("XDG_CONFIG_HOME", "/nonexistent/logparse-test-home/.config");

    for var in [
        "LOGPARSE_BASE_URL",
        "LOGPARSE_TIMEOUT",
        "LOGPARSE_MAX_RETRIES",
        "LOGPARSE_SKIP_VERIFY",
        "LOGPARSE_OUTPUT_DIR",
        "LOGPARSE_OVERWRITE",
        "LOGPARSE_CONFIG_PATH",
        "LOGPARSE_OTLP_ENDPOINT",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }

    cmd
}

/// Returns a hermetic command targeting `base_url` and writing into `output_dir`.
#[allow(dead_code)]
pub fn logparse_cmd_for(base_url: &str, output_dir: &std::path::Path) -> Command {
    let mut cmd = logparse_cmd();
    cmd.env("LOGPARSE_BASE_URL", base_url)
        .env("LOGPARSE_OUTPUT_DIR", output_dir)
        .env("LOGPARSE_MAX_RETRIES", "0");
    cmd
}
