use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid cache capacity: {0}. Must be at least 1")]
    InvalidCacheCapacity(usize),

    #[error("Invalid poll interval: {0}. Must be at least 1 second")]
    InvalidPollInterval(u64),

    #[error("Invalid request timeout: {0}. Must be at least 1 second")]
    InvalidTimeout(u64),

    #[error("Travis base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidLogRotation(String),

    #[error("Invalid tile #{index}: {reason}")]
    InvalidTile { index: usize, reason: String },
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .tilewatch/config.yaml
    /// 3. .tilewatch/local.yaml (optional local overrides)
    /// 4. Environment variables (TILEWATCH_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Self::base_figment()
            .merge(Yaml::file(".tilewatch/config.yaml"))
            .merge(Yaml::file(".tilewatch/local.yaml"))
            .merge(Env::prefixed("TILEWATCH_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honouring env overrides
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Self::base_figment()
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("TILEWATCH_").split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn base_figment() -> Figment {
        Figment::new().merge(Serialized::defaults(Config::default()))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.cache.capacity == 0 {
            return Err(ConfigError::InvalidCacheCapacity(config.cache.capacity));
        }

        if config.poll.interval_secs == 0 {
            return Err(ConfigError::InvalidPollInterval(config.poll.interval_secs));
        }

        if config.travis.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.travis.timeout_secs));
        }

        if config.travis.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidLogRotation(
                config.logging.rotation.clone(),
            ));
        }

        for (index, tile) in config.tiles.iter().enumerate() {
            tile.validate().map_err(|err| ConfigError::InvalidTile {
                index,
                reason: err.to_string(),
            })?;
        }

        Ok(())
    }
}
