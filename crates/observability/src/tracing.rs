//! Tracing/logging initialization.
//!
//! Access decisions and membership mutations emit structured events; this
//! wires them to a JSON subscriber filtered via `RUST_LOG`.

use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVES: &str = "info,orgdesk=debug";

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    // JSON logs + timestamps, configurable via RUST_LOG.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}

/// Human-readable subscriber for tests and local debugging.
///
/// Same idempotence contract as [`init`].
pub fn init_for_tests() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(DEFAULT_DIRECTIVES))
        .with_test_writer()
        .compact()
        .try_init();
}
