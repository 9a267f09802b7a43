//! Logging setup for applications embedding ticket-desk

use tracing_subscriber::EnvFilter;

/// Install a formatted `tracing` subscriber
///
/// `RUST_LOG` wins when set; otherwise the level is `debug` in verbose mode
/// and `info` otherwise. Returns false if a global subscriber was already
/// installed, which makes repeated calls harmless.
pub fn init(verbose: bool) -> bool {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}
