use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::build::BuildParams;

/// Main configuration structure for tilewatch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Travis CI API settings
    #[serde(default)]
    pub travis: TravisConfig,

    /// Build history cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Polling loop settings
    #[serde(default)]
    pub poll: PollConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Monitored repository/branch targets
    #[serde(default)]
    pub tiles: Vec<BuildParams>,
}

/// Travis CI API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TravisConfig {
    /// API root, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API token; anonymous requests are made when absent
    #[serde(default)]
    pub token: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.travis-ci.com".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

impl Default for TravisConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Build history cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CacheConfig {
    /// Terminal outcomes retained per tile
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

const fn default_capacity() -> usize {
    5
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

/// Polling loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PollConfig {
    /// Seconds between polling rounds
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

const fn default_interval_secs() -> u64 {
    30
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; stderr only when absent
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// File rotation: daily, hourly or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}
