//! CLI command implementations.

pub mod build;
pub mod config;
pub mod watch;

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

use crate::adapters::cache::BuildHistoryCache;
use crate::adapters::travisci::{TravisClient, TravisClientConfig};
use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;
use crate::services::BuildTileService;

/// Load configuration from `path`, or from the project-local hierarchy.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

/// Wire the Travis client and a fresh build history into a tile service.
pub fn tile_service(config: &Config) -> Result<Arc<BuildTileService>> {
    let client = TravisClient::new(TravisClientConfig::from(&config.travis))
        .context("Failed to create Travis CI client")?;
    let history = Arc::new(BuildHistoryCache::new(config.cache.capacity));

    Ok(Arc::new(BuildTileService::new(Arc::new(client), history)))
}
