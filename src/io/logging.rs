//! Diagnostic logging setup
//!
//! Logs go to stderr so that kernels written to stdout stay machine-readable.

use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::io::configuration::DEFAULT_LOG_FILTER;

/// Filter directive for a `-v` count, or `error` when quiet
pub const fn filter_for(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbosity {
        0 => DEFAULT_LOG_FILTER,
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over the verbosity flags. Calling this more
/// than once is harmless; later calls leave the first subscriber in place.
pub fn init_logging(verbosity: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_for(verbosity, quiet)));

    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
    {
        debug!(%err, "global subscriber already installed");
    }
}
