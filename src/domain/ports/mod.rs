//! Port trait definitions (Hexagonal Architecture)
//!
//! - StatusProvider: fetches the latest build from a CI provider
//!
//! Adapters implement these so the tile service stays independent of any
//! specific CI backend.

pub mod status_provider;

pub use status_provider::StatusProvider;
