//! Configuration management for shiftplan
//!
//! Settings come from a TOML file or from `SHIFTPLAN_*` environment
//! variables; every field has a default so a partial file is enough.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::optimizer::ClientConfig;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Optimization service connection
    pub optimizer: OptimizerConfig,

    /// Where records and schedules are persisted
    pub storage: StorageConfig,

    /// Scheduling run defaults
    pub scheduling: SchedulingConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Optimization service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Service base URL
    pub url: String,

    /// Whether to try the service at all
    pub enabled: bool,

    /// Health probe timeout in seconds
    pub health_timeout_secs: u64,

    /// Optimization request timeout in seconds
    pub request_timeout_secs: u64,

    /// Extra health probe attempts
    pub retry_count: u32,

    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            url: String::from("http://localhost:8000"),
            enabled: true,
            health_timeout_secs: 2,
            request_timeout_secs: 30,
            retry_count: 2,
            retry_delay_ms: 250,
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding `employees.json`, `shifts.json` and `schedule.json`
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
        }
    }
}

/// Scheduling defaults
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingConfig {
    /// Never call the optimizer
    pub heuristic_only: bool,

    /// Period sent to the optimizer (`YYYY-MM-DD/YYYY-MM-DD`); derived from
    /// the shifts when unset
    pub period: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse::<T>().ok())
}

fn env_bool(name: &str) -> Option<bool> {
    std::env::var(name)
        .ok()
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let optimizer = OptimizerConfig {
            url: std::env::var("SHIFTPLAN_OPTIMIZER_URL").unwrap_or(defaults.optimizer.url),
            enabled: env_bool("SHIFTPLAN_OPTIMIZER_ENABLED").unwrap_or(defaults.optimizer.enabled),
            health_timeout_secs: env_parse("SHIFTPLAN_HEALTH_TIMEOUT")
                .unwrap_or(defaults.optimizer.health_timeout_secs),
            request_timeout_secs: env_parse("SHIFTPLAN_REQUEST_TIMEOUT")
                .unwrap_or(defaults.optimizer.request_timeout_secs),
            retry_count: env_parse("SHIFTPLAN_RETRY_COUNT").unwrap_or(defaults.optimizer.retry_count),
            retry_delay_ms: env_parse("SHIFTPLAN_RETRY_DELAY_MS")
                .unwrap_or(defaults.optimizer.retry_delay_ms),
        };

        let storage = StorageConfig {
            data_dir: std::env::var("SHIFTPLAN_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage.data_dir),
        };

        let scheduling = SchedulingConfig {
            heuristic_only: env_bool("SHIFTPLAN_HEURISTIC_ONLY").unwrap_or(false),
            period: std::env::var("SHIFTPLAN_PERIOD").ok().filter(|p| !p.trim().is_empty()),
        };

        let logging = LoggingConfig {
            level: std::env::var("SHIFTPLAN_LOG_LEVEL").unwrap_or(defaults.logging.level),
            format: std::env::var("SHIFTPLAN_LOG_FORMAT").unwrap_or(defaults.logging.format),
        };

        Ok(Self {
            optimizer,
            storage,
            scheduling,
            logging,
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load from `path` when given, else from the environment, then validate
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::from_env()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.optimizer.url)
            .with_context(|| format!("Invalid optimizer url: {}", self.optimizer.url))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("optimizer url must use http or https, got '{}'", url.scheme());
        }

        if self.optimizer.health_timeout_secs == 0 {
            anyhow::bail!("health_timeout_secs must be greater than 0");
        }

        if self.optimizer.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }

        if self.storage.data_dir.as_os_str().is_empty() {
            anyhow::bail!("data_dir must not be empty");
        }

        if let Some(period) = &self.scheduling.period {
            period
                .parse::<crate::models::Period>()
                .map_err(anyhow::Error::msg)
                .context("Invalid scheduling period")?;
        }

        if self.logging.level.trim().is_empty() {
            anyhow::bail!("log level must not be empty");
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            anyhow::bail!("log format must be 'text' or 'json', got '{}'", self.logging.format);
        }

        Ok(())
    }

    /// Get health probe timeout as Duration
    #[must_use]
    pub fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.optimizer.health_timeout_secs)
    }

    /// Get optimization request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.optimizer.request_timeout_secs)
    }

    /// Optimizer client settings derived from this configuration
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.optimizer.url.clone())
            .with_health_timeout(self.health_timeout())
            .with_request_timeout(self.request_timeout())
            .with_retry_count(self.optimizer.retry_count)
            .with_retry_delay(Duration::from_millis(self.optimizer.retry_delay_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_optimizer_url() {
        let mut config = Config::default();
        config.optimizer.url = String::from("localhost:8000/api");
        assert!(config.validate().is_err());

        config.optimizer.url = String::from("not a url");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeouts_rejected() {
        let mut config = Config::default();
        config.optimizer.request_timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.optimizer.health_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_period_and_log_settings() {
        let mut config = Config::default();
        config.scheduling.period = Some(String::from("2025-07-07/2025-07-01"));
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.level = String::from(" ");
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.format = String::from("xml");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [optimizer]
            url = "http://solver:9000"
            retry_count = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.optimizer.url, "http://solver:9000");
        assert_eq!(config.optimizer.retry_count, 0);
        assert_eq!(config.optimizer.request_timeout_secs, 30);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_client_config_conversion() {
        let config = Config::default();
        let client = config.client_config();
        assert_eq!(client.base_url, "http://localhost:8000");
        assert_eq!(client.request_timeout, Duration::from_secs(30));
        assert_eq!(client.retry_delay, Duration::from_millis(250));
    }
}
