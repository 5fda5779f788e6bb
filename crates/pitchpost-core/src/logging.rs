//! Logging bootstrap.
//!
//! Installs a `tracing-subscriber` fmt subscriber writing to stderr, so
//! machine-readable output on stdout stays clean. The filter comes from
//! `PITCHPOST_LOG` when set, otherwise from the configured level.

use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured log filter.
pub const LOG_ENV_VAR: &str = "PITCHPOST_LOG";

const FALLBACK_LEVEL: &str = "warn";

/// Build the filter directive from the environment or `configured_level`.
pub fn resolve_filter(configured_level: Option<&str>) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV_VAR) {
        return filter;
    }
    configured_level
        .and_then(|level| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new(FALLBACK_LEVEL))
}

/// Install the global subscriber.
///
/// Idempotent: a second call, or a call after another subscriber was
/// installed, returns `false` and leaves the existing one in place. Never
/// panics.
pub fn init_logging(configured_level: Option<&str>) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(resolve_filter(configured_level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_rejected_without_panicking() {
        let _ = init_logging(Some("debug"));
        assert!(!init_logging(Some("info")));
    }

    #[test]
    fn bad_configured_level_falls_back() {
        let filter = resolve_filter(Some("pitchpost=loud"));
        if std::env::var_os(LOG_ENV_VAR).is_none() {
            assert_eq!(filter.to_string(), FALLBACK_LEVEL);
        }
    }
}
