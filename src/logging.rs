//! Logging configuration for db-select.
//!
//! Logs go to stderr so stdout carries only the JSON result.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "warn";

/// Builds the env filter, honoring `RUST_LOG` and falling back to `default`.
pub fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Initializes logging to stderr.
///
/// `verbose` raises the fallback level to `debug` for this crate.
pub fn init_stderr_logging(verbose: bool) {
    let default = if verbose {
        "warn,db_select=debug"
    } else {
        DEFAULT_FILTER
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default))
        .with_writer(std::io::stderr)
        .init();
}

