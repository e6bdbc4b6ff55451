//! Domain layer for tilewatch
//!
//! Tile and build models, the provider port, and the errors raised at the
//! provider boundary.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult, Severity, TileError};
