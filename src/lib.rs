//! tilewatch - CI build status tiles for dashboards
//!
//! tilewatch polls Travis CI for the latest build of each monitored
//! repository/branch and renders it as a normalized tile. A bounded,
//! process-wide build history supplies what a single build record cannot:
//! the previous terminal status of the branch and an estimated duration for
//! a running build.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): tile and build models, the provider port, errors
//! - **Adapters** (`adapters`): build history cache and the Travis CI client
//! - **Service Layer** (`services`): tile orchestration and concurrent polling
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tilewatch::{BuildHistoryCache, BuildParams, BuildTileService, TravisClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = TravisClient::new(Default::default())?;
//!     let service = BuildTileService::new(Arc::new(client), Arc::new(BuildHistoryCache::default()));
//!     let tile = service.build(&BuildParams::new("monitoror", "monitoror", "master")).await?;
//!     println!("{:?}", tile.status);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::cache::{BuildHistoryCache, BuildOutcome};
pub use adapters::travisci::{TravisClient, TravisClientConfig};
pub use domain::models::{Author, BuildParams, BuildRecord, Config, Tile, TileStatus, TileType};
pub use domain::ports::StatusProvider;
pub use domain::{DomainError, DomainResult, Severity, TileError};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{parse_state, BuildTileService, PollRound, TilePoller};
