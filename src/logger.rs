//! Diagnostic logging
//!
//! Log lines go to stderr through `tracing`; probe results go to stdout, so the
//! two never interleave in a captured report.

use crate::constants::LOG_VERBOSE_ENV;
use tracing_subscriber::EnvFilter;

/// Whether debug-level logging was requested through the environment
pub fn verbose_from_env() -> bool {
    std::env::var(LOG_VERBOSE_ENV)
        .map(|v| v == "1")
        .unwrap_or(false)
}

/// Default filter directive for the given verbosity
fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "demo_monitor=debug,info"
    } else {
        "info"
    }
}

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over `verbose` when set. Calling this more than
/// once is harmless; later calls are ignored.
pub fn init(verbose: bool) {
    let verbose = verbose || verbose_from_env();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
