//! Library configuration.
//!
//! Settings are read from a TOML file with environment overrides and feed the
//! credential policy, the response classifier and logging.

use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use thiserror::Error;

use crate::credentials::CredentialPolicy;
use crate::error::CloudErrorType;
use crate::logging::{LogLevel, LoggingConfig};

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "WAREHOUSE";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum WarehouseConfigError {
    /// The configuration file was not found.
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    /// The configuration file could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(#[from] ConfigError),

    /// The configuration file path is invalid.
    #[error("invalid configuration path: {0}")]
    InvalidPath(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, WarehouseConfigError>;

/// A provider-code rule supplied through configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuleSettings {
    /// Regex applied to the provider error code.
    pub pattern: String,
    /// Category assigned on match.
    pub error_type: CloudErrorType,
}

/// Response classifier settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClassifierSettings {
    /// Regex whose first matching group is the provider code.
    #[serde(default)]
    pub code_pattern: Option<String>,
    /// Regex whose first matching group is the provider message.
    #[serde(default)]
    pub message_pattern: Option<String>,
    /// Extra rules, consulted before the built-in ones.
    #[serde(default)]
    pub rules: Vec<RuleSettings>,
}

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WarehouseConfig {
    #[serde(default)]
    pub credentials: CredentialPolicy,
    #[serde(default)]
    pub classifier: ClassifierSettings,
    #[serde(default)]
    pub log_level: LogLevel,
}

impl WarehouseConfig {
    /// Load configuration from a file path.
    ///
    /// Values may be overridden with environment variables of the form
    /// `WAREHOUSE__<SECTION>__<KEY>` (e.g. `WAREHOUSE__CREDENTIALS__PASSWORD_LENGTH=32`).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration file does not exist
    /// - The configuration file cannot be parsed
    /// - The path is invalid
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use cloud_warehouse::config::WarehouseConfig;
    ///
    /// let config = WarehouseConfig::load("warehouse.toml")?;
    /// # Ok::<(), cloud_warehouse::config::WarehouseConfigError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();

        let path_str = path
            .to_str()
            .ok_or_else(|| WarehouseConfigError::InvalidPath(format!("{:?}", path)))?;

        if !path.exists() {
            return Err(WarehouseConfigError::FileNotFound(path_str.to_string()));
        }

        let config = Config::builder()
            .add_source(File::with_name(path_str))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Logging configuration with this crate's level taken from `log_level`.
    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig::new().with_level(self.log_level)
    }

    /// Load configuration from a TOML string, without environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the string cannot be parsed.
    pub fn from_toml_str(toml: &str) -> ConfigResult<Self> {
        let config = Config::builder()
            .add_source(File::from_str(toml, config::FileFormat::Toml))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
