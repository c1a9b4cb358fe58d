//! Tracing subscriber setup.
//!
//! Logs go to stderr so they never mix with note output on stdout.
//! Filter precedence: `NOTELOCK_LOG`, then `RUST_LOG`, then the config level.

use tracing_subscriber::EnvFilter;

use crate::constants::LOG_ENV;

/// Build the log filter from the environment, falling back to `config_level`.
pub fn build_filter(config_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .or_else(|_| EnvFilter::try_new(config_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns `Err` if a subscriber is already registered.
pub fn init(config_level: &str) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(config_level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_level_falls_back() {
        // Unparseable directives must not panic.
        let filter = build_filter("not a [valid] filter===");
        let rendered = filter.to_string();
        assert!(!rendered.is_empty());
    }

    #[test]
    fn test_config_level_is_used() {
        if std::env::var(LOG_ENV).is_ok() || std::env::var("RUST_LOG").is_ok() {
            return;
        }
        assert_eq!(build_filter("debug").to_string(), "debug");
    }
}
