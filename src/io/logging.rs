//! Tracing subscriber setup for the command-line tool

use crate::io::configuration::{DEFAULT_LOG_FILTER, VERBOSE_LOG_FILTER};
use tracing_subscriber::EnvFilter;

/// Filter directives used when `RUST_LOG` is unset
pub const fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    }
}

/// Install a stderr subscriber honouring `RUST_LOG`
///
/// Returns `false` if a global subscriber was already installed, which
/// happens when several runs share a process (as in tests).
pub fn init(verbose: bool) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}
