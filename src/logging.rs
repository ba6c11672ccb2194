//! Tracing setup for the binary.

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding the log filter, e.g. `buildcost=debug`.
pub const LOG_ENV: &str = "BUILDCOST_LOG";
pub const DEFAULT_FILTER: &str = "buildcost=info";

static INIT: Once = Once::new();

/// Install the global subscriber. Safe to call more than once.
///
/// Logs go to stderr so `--json` output on stdout stays machine-readable.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // Fails only if another subscriber is already installed; keep that one.
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(filter)
            .try_init();
    });
}
