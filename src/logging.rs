//! Diagnostics setup for the `confight` binary.
//!
//! The library only emits `tracing` events; installing a subscriber is left to
//! the application. This module provides the one the command-line tool uses:
//! human-readable output on stderr, filtered by a [`LogLevel`] unless
//! `RUST_LOG` says otherwise.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Verbosity accepted by `--verbose`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    #[default]
    Error,
    Critical,
}

impl LogLevel {
    /// Closest `tracing` level. `tracing` has nothing above ERROR, so
    /// `Critical` shares it.
    pub fn as_tracing(self) -> Level {
        match self {
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warning => Level::WARN,
            LogLevel::Error | LogLevel::Critical => Level::ERROR,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            "critical" => Ok(LogLevel::Critical),
            _ => Err(format!(
                "Invalid level '{}'. Valid options: debug, info, warning, error, critical",
                s
            )),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warning => write!(f, "warning"),
            LogLevel::Error => write!(f, "error"),
            LogLevel::Critical => write!(f, "critical"),
        }
    }
}

/// Filter for `level`, unless `RUST_LOG` holds a valid directive.
pub fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.as_tracing().into()))
}

/// Install the global stderr subscriber.
///
/// Fails if a global subscriber is already set.
pub fn init(level: LogLevel) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
}
