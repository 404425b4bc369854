//! Unified test logging initialization
//!
//! One initializer shared by the backend's unit tests (through its
//! `test_bootstrap` module) and by every integration test binary (through a
//! `ctor` hook in `tests/common`).

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

const DEFAULT_FILTER: &str = "warn";

/// Initialize structured logging for tests.
///
/// Idempotent and race-safe. The filter is read in order of precedence:
///
/// 1. `TEST_LOG` (preferred)
/// 2. `RUST_LOG` (fallback)
/// 3. `"warn"`
///
/// Setting `TEST_LOG_JSON=1` switches to the JSON formatter used in
/// production, which is handy when checking structured fields of
/// `[ROOMS]` / `[WS SESSION]` events.
///
/// ```bash
/// TEST_LOG=ultictactoe_backend=debug cargo test --test websocket_tests
/// ```
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let json = std::env::var("TEST_LOG_JSON")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let builder = fmt()
            .with_env_filter(filter)
            .with_test_writer() // cargo/nextest capture
            .without_time();

        // Never panic if another subscriber won the race.
        if json {
            builder.json().try_init().ok();
        } else {
            builder.try_init().ok();
        }
    });
}
