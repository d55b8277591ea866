//! Logging initialisation.
//!
//! The crate emits `tracing` events; a binary or test harness installs a
//! subscriber with one of the functions below.

use tracing_subscriber::{fmt, EnvFilter};

/// Installs a formatting subscriber.
///
/// # Environment
/// - `RUST_LOG`: filter directives (default `info`),
///   e.g. `RUST_LOG=u_logistics=debug`.
///
/// # Example
/// ```no_run
/// u_logistics::logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// Installs a debug-level subscriber writing through the test harness.
///
/// Safe to call from every test; later calls are no-ops.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
