//! crates/logging/src/tracing_bridge.rs
//! Installation of the process-wide tracing subscriber.
//!
//! Events are formatted by `tracing-subscriber`'s fmt layer and written to
//! stderr so that stdout stays reserved for command output such as dry-run
//! listings.

use std::io;

use tracing_subscriber::EnvFilter;

use crate::Verbosity;

/// Builds the event filter for `verbosity`.
///
/// `RUST_LOG` takes precedence when it is set and parses; otherwise the
/// directive derived from `verbosity` applies to every target.
#[must_use]
pub fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive()))
}

/// Initialize tracing for the current process.
///
/// Returns `false` when a global subscriber was already installed, which
/// happens when the CLI entry point runs more than once in one process (as in
/// tests). The existing subscriber is left in place.
///
/// # Example
///
/// ```rust,ignore
/// use logging::{Verbosity, init_tracing};
///
/// init_tracing(Verbosity::from_flags(2, false));
/// logging::trace_walk!("walking {}", root.display());
/// ```
pub fn init_tracing(verbosity: Verbosity) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_writer(io::stderr)
        .with_target(true)
        .without_time()
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_initialisation_is_reported() {
        let _ = init_tracing(Verbosity::Quiet);
        assert!(!init_tracing(Verbosity::Quiet));
    }
}
