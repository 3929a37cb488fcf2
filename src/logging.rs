//! Logging setup for applications embedding this library.
//!
//! The library itself only emits `tracing` events. Binaries and tests that want
//! to see them can install a subscriber through [`init_logging`], which writes
//! to stderr and honors `RUST_LOG` when it is set.

use serde::Deserialize;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// Target under which this crate emits its events.
pub const LOG_TARGET: &str = "cloud_warehouse";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    /// Failed provider responses are logged at this level.
    #[default]
    Warn,
    Error,
    Off,
}

impl LogLevel {
    /// Filter directive name for this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error | LogLevel::Off => Level::ERROR,
        }
    }
}

/// Configuration for the stderr subscriber.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Level applied to this crate's events
    pub level: LogLevel,
    /// Level applied to every other target
    pub default_level: LogLevel,
    pub with_timestamps: bool,
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Warn,
            default_level: LogLevel::Warn,
            with_timestamps: true,
            with_target: true,
        }
    }
}

impl LoggingConfig {
    /// Create a new logging configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the level for this crate's events.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Set the level for other targets.
    pub fn with_default_level(mut self, level: LogLevel) -> Self {
        self.default_level = level;
        self
    }

    /// Set whether to include timestamps.
    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.with_timestamps = enabled;
        self
    }

    /// Set whether to include the target (module path).
    pub fn with_target(mut self, enabled: bool) -> Self {
        self.with_target = enabled;
        self
    }

    /// Filter directives equivalent to this configuration, e.g. `warn,cloud_warehouse=debug`.
    pub fn directives(&self) -> String {
        format!(
            "{},{}={}",
            self.default_level.as_str(),
            LOG_TARGET,
            self.level.as_str()
        )
    }
}

/// Install a global stderr subscriber.
///
/// `RUST_LOG` takes precedence over the configured levels. Returns an error if
/// a global subscriber is already installed.
///
/// # Examples
///
/// ```no_run
/// use cloud_warehouse::logging::{init_logging, LogLevel, LoggingConfig};
///
/// init_logging(LoggingConfig::new().with_level(LogLevel::Debug)).ok();
/// ```
pub fn init_logging(
    config: LoggingConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let env_filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(config.directives())?
    };

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(config.with_target);

    if config.with_timestamps {
        subscriber.try_init()
    } else {
        subscriber.without_time().try_init()
    }
}
