//! Travis build state to tile status mapping.
//!
//! Dashboards key their visual treatment off the resulting status, so this
//! table is part of the external contract.

use crate::domain::models::TileStatus;

/// Map a Travis build state to a tile status. Unknown states map to
/// [`TileStatus::Unknown`].
pub fn parse_state(state: &str) -> TileStatus {
    match state {
        "created" | "received" => TileStatus::Queued,
        "started" => TileStatus::Running,
        "passed" => TileStatus::Success,
        "failed" | "errored" => TileStatus::Failed,
        "canceled" => TileStatus::Aborted,
        _ => TileStatus::Unknown,
    }
}
