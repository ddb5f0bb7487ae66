//! Structured logging setup.
//!
//! Provides tracing-based logging with environment variable configuration
//! and a per-request verbosity level used by the dispatch layer. When no
//! subscriber is installed, all logging calls are no-ops.

use tracing::Level;
use tracing_subscriber::{
    EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Diagnostic verbosity attached to a request descriptor.
///
/// Levels are ordered: a request configured at `Verbose` also emits
/// everything `Errors` would.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// No diagnostics (the default).
    #[default]
    Off,
    /// Error diagnostics only.
    Errors,
    /// Request/response lines for every dispatch.
    Verbose,
    /// Everything, including response body previews.
    Debug,
}

impl LogLevel {
    /// Maps this level onto a `tracing` level, `None` when off.
    pub fn tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Errors => Some(Level::ERROR),
            LogLevel::Verbose => Some(Level::DEBUG),
            LogLevel::Debug => Some(Level::TRACE),
        }
    }

    fn filter_directive(self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Errors => "error",
            LogLevel::Verbose => "debug",
            LogLevel::Debug => "trace",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Off => write!(f, "off"),
            LogLevel::Errors => write!(f, "errors"),
            LogLevel::Verbose => write!(f, "verbose"),
            LogLevel::Debug => write!(f, "debug"),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable formatted output.
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON format for production environments.
    Json,
}

/// Subscriber configuration for [`init_logging`].
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum level to emit; overridden by `RUST_LOG` when set.
    pub level: LogLevel,
    /// Output format.
    pub format: LogFormat,
    /// Whether to show the target module path.
    pub show_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Errors,
            format: LogFormat::Compact,
            show_target: false,
        }
    }
}

/// Installs a global tracing subscriber from the given configuration.
///
/// Returns an error if a global subscriber is already installed.
pub fn try_init_logging(
    config: &LogConfig,
) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.filter_directive()));

    let layer = match config.format {
        LogFormat::Pretty => fmt::layer().with_target(config.show_target).pretty().boxed(),
        LogFormat::Compact => fmt::layer().with_target(config.show_target).compact().boxed(),
        LogFormat::Json => fmt::layer().with_target(config.show_target).json().boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()?;
    Ok(())
}

/// Installs a global tracing subscriber, ignoring double-init errors.
pub fn init_logging(config: &LogConfig) {
    let _ = try_init_logging(config);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered() {
        assert!(LogLevel::Off < LogLevel::Errors);
        assert!(LogLevel::Errors < LogLevel::Verbose);
        assert!(LogLevel::Verbose < LogLevel::Debug);
    }

    #[test]
    fn tracing_level_mapping() {
        assert_eq!(LogLevel::Off.tracing_level(), None);
        assert_eq!(LogLevel::Errors.tracing_level(), Some(Level::ERROR));
        assert_eq!(LogLevel::Verbose.tracing_level(), Some(Level::DEBUG));
        assert_eq!(LogLevel::Debug.tracing_level(), Some(Level::TRACE));
    }
}
