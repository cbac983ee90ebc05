//! Diagnostic output on stderr via `tracing`.
//!
//! Priority: RUST_LOG env var > `-v` flags > config `[logging] level` > "info".

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

use crate::config::DEFAULT_LOG_LEVEL;

/// Install the global subscriber. Safe to call more than once; later calls are no-ops.
pub fn init(verbose: u8, config_level: Option<&str>) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose > 1 {
        EnvFilter::new("trace")
    } else if verbose == 1 {
        EnvFilter::new("debug")
    } else if let Some(level) = config_level {
        EnvFilter::new(level)
    } else {
        EnvFilter::new(DEFAULT_LOG_LEVEL)
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .compact()
        .try_init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Logging initialised");
}
