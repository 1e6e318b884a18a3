//! Structured diagnostics through `tracing`.
//!
//! User-facing output goes through `ui::messages`; this subscriber only
//! carries diagnostics to stderr. `RUST_LOG` wins over the configured level.

use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber. Safe to call more than once.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Verbose subscriber for tests, routed through the test harness writer.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
