//! In-memory caching layer.
//!
//! Holds the bounded build history shared by every tile poller. Nothing
//! here is persisted; history starts empty on each process start.

pub mod build_history;

pub use build_history::{BuildHistoryCache, BuildOutcome, DEFAULT_CAPACITY};
