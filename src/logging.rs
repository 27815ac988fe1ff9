//! Tracing subscriber setup driven by [`LoggingConfig`]

use crate::config::LoggingConfig;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the filter: `RUST_LOG` wins, otherwise the configured level for this crate.
#[must_use]
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("whentogo={level},warn")))
}

/// Install the global subscriber. Output goes to stderr so reports on stdout stay clean.
///
/// Calling this twice is harmless; the second install is ignored.
pub fn init(config: &LoggingConfig) {
    let filter = env_filter(&config.level);
    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };

    if let Err(e) = result {
        tracing::debug!("Tracing subscriber already installed: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        let config = LoggingConfig::default();
        init(&config);
        init(&config);
    }

    #[test]
    fn test_env_filter_uses_configured_level() {
        let filter = env_filter("debug");
        if std::env::var("RUST_LOG").is_err() {
            assert!(filter.to_string().contains("whentogo=debug"));
        }
    }
}
