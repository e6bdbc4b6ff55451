//! Travis CI status provider.

pub mod client;
pub mod models;

pub use client::{TravisClient, TravisClientConfig};
