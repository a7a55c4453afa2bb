//! Shared fixtures for the `dagit-layout` integration tests.
//!
//! - [`builders`] builds node lists and run metadata.
//! - [`init_tracing`] installs a test subscriber once per test binary.

pub mod builders;

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Route `tracing` output through the test harness.
///
/// Output is captured per test and only shown for failures (or with
/// `--nocapture`). The filter comes from `RUST_LOG`, e.g.
/// `RUST_LOG=dagit_layout=debug`, and defaults to `warn` so the cycle
/// warnings from the layout show up.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

        // Another harness may already have installed one.
        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}
