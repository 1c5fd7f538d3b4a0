//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `roikit.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

use roikit_domain::calculator::DEFAULT_HOURLY_RATE;

/// Browser default for per-origin session storage, in UTF-16 code units.
const DEFAULT_SESSION_QUOTA: usize = 5 * 1024 * 1024;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Savings calculator settings.
    pub calculator: CalculatorConfig,
    /// Session store settings.
    pub session: SessionConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Savings calculator configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Hourly rate used initially and restored on reset.
    pub default_hourly_rate: f64,
}

/// Session store configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum UTF-16 code units held by the store; `0` disables the limit.
    pub quota_units: usize,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `roikit.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("roikit.toml")?;
        config.apply_env_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("ROIKIT_HOURLY_RATE")
            && let Ok(rate) = val.parse()
        {
            self.calculator.default_hourly_rate = rate;
        }
        if let Some(val) = var("ROIKIT_SESSION_QUOTA")
            && let Ok(quota) = val.parse()
        {
            self.session.quota_units = quota;
        }
        if let Some(val) = var("ROIKIT_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let rate = self.calculator.default_hourly_rate;
        if !rate.is_finite() || rate < 0.0 {
            return Err(ConfigError::Validation(format!(
                "default hourly rate must be a non-negative number, got {rate}"
            )));
        }
        Ok(())
    }

    /// Return the store quota, or `None` when unlimited.
    #[must_use]
    pub fn session_quota(&self) -> Option<usize> {
        (self.session.quota_units > 0).then_some(self.session.quota_units)
    }
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            default_hourly_rate: DEFAULT_HOURLY_RATE,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            quota_units: DEFAULT_SESSION_QUOTA,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "roikit=info,roikit_app=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
