//! Structured logging configuration.
//!
//! Installs a global `tracing-subscriber` with an `EnvFilter` (`RUST_LOG`,
//! falling back to the configured level) and either human-readable or JSON
//! output.
//!
//! ```ignore
//! use larkbridge_infra::observability::{init_tracing, LoggingConfig};
//!
//! init_tracing(&LoggingConfig::from_env());
//! ```

use tracing::Level;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Output format and default level for the global subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Emit JSON lines instead of human-readable text.
    pub json_format: bool,
    /// Used when `RUST_LOG` is unset or invalid.
    pub default_level: Level,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { json_format: false, default_level: Level::INFO }
    }
}

impl LoggingConfig {
    /// JSON output at the default level.
    pub fn json() -> Self {
        Self { json_format: true, ..Default::default() }
    }

    /// Level used when `RUST_LOG` is unset.
    pub fn with_level(mut self, level: Level) -> Self {
        self.default_level = level;
        self
    }

    /// JSON output when `LARK_LOG_FORMAT=json`.
    pub fn from_env() -> Self {
        let json_format = std::env::var("LARK_LOG_FORMAT")
            .map(|value| value.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        Self { json_format, ..Default::default() }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.default_level.to_string()))
    }
}

/// Install the global subscriber.
///
/// Returns `false` if a subscriber was already installed; the existing one
/// stays in place.
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let filter = config.filter();

    let installed = if config.json_format {
        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_current_span(true).with_target(true));
        tracing::subscriber::set_global_default(subscriber).is_ok()
    } else {
        let subscriber =
            tracing_subscriber::registry().with(filter).with(fmt::layer().with_target(true));
        tracing::subscriber::set_global_default(subscriber).is_ok()
    };

    if installed {
        tracing::debug!(json = config.json_format, "tracing initialized");
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_set_format_and_level() {
        let config = LoggingConfig::json().with_level(Level::DEBUG);
        assert!(config.json_format);
        assert_eq!(config.default_level, Level::DEBUG);
        assert!(!LoggingConfig::default().json_format);
    }

    #[test]
    fn second_install_is_rejected() {
        init_tracing(&LoggingConfig::default());
        assert!(!init_tracing(&LoggingConfig::json()));
    }
}
