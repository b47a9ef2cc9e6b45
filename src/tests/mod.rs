//! Tests for blockpack.

use std::sync::Once;

mod unpack;

static INIT_LOGGING: Once = Once::new();

/// Route `tracing` output to the test harness. Safe to call repeatedly.
pub(crate) fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .with_target(true)
            .with_ansi(false)
            .try_init();
    });
}
