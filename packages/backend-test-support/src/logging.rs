//! One-time tracing bootstrap for test binaries.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Default filter when no environment override is present. Engine warnings
/// (rejected preconditions) stay visible; everything else is quiet.
pub const DEFAULT_TEST_FILTER: &str = "warn";

/// Resolve the filter directive: `TEST_LOG`, then `RUST_LOG`, then the default.
pub fn filter_directive() -> String {
    std::env::var("TEST_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| DEFAULT_TEST_FILTER.to_string())
}

/// Install the test subscriber.
///
/// Idempotent and race-safe; later calls are no-ops. Output goes through
/// `with_test_writer()` so cargo captures it per test, and timestamps are
/// dropped to keep failure output stable.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = EnvFilter::try_new(filter_directive())
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_TEST_FILTER));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .with_target(false)
            .try_init()
            .ok();
    });
}
