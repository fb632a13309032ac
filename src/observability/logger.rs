//! Structured logging setup
//!
//! Events are emitted with `tracing` using an uppercase event name as the
//! message and key/value fields for context, e.g.
//!
//! ```ignore
//! info!(entity = %entity, id = id, "RECORD_CREATED");
//! ```
//!
//! Output goes to stderr so that stdout stays reserved for the menu and
//! for JSON responses.

use std::io;

use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured log filter
pub const LOG_ENV: &str = "LEDGERBOOK_LOG";

/// Filter used when neither the environment nor the config supplies one
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Returns whether `directive` is a usable filter (e.g. `info`, `ledgerbook=debug`)
pub fn is_valid_filter(directive: &str) -> bool {
    EnvFilter::try_new(directive).is_ok()
}

/// Builds the active filter: `LEDGERBOOK_LOG` first, then `configured`,
/// then [`DEFAULT_LOG_LEVEL`].
pub fn build_filter(configured: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(configured))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Installs the global subscriber. Safe to call more than once; only the
/// first call has an effect.
pub fn init(configured: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(configured))
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_filters() {
        assert!(is_valid_filter("info"));
        assert!(is_valid_filter("ledgerbook=debug,warn"));
    }

    #[test]
    fn test_invalid_filter() {
        assert!(!is_valid_filter("ledgerbook=loud"));
    }
}
