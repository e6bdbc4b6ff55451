//! Domain models.

pub mod build;
pub mod config;
pub mod tile;

pub use build::{BuildParams, BuildRecord};
pub use config::{CacheConfig, Config, LoggingConfig, PollConfig, TravisConfig};
pub use tile::{Author, Tile, TileStatus, TileType};
