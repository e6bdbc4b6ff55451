//! Dashboard tile model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized build status shown on a tile.
///
/// The serialized names are what dashboards key their colours off, so they
/// must not change without a versioned contract change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TileStatus {
    Queued,
    Running,
    Success,
    #[serde(rename = "FAILURE")]
    Failed,
    Aborted,
    Unknown,
    Warning,
}

impl TileStatus {
    /// Whether this status closes a build and belongs in build history.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Failed)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Queued => "QUEUED",
            Self::Running => "RUNNING",
            Self::Success => "SUCCESS",
            Self::Failed => "FAILURE",
            Self::Aborted => "ABORTED",
            Self::Unknown => "UNKNOWN",
            Self::Warning => "WARNING",
        }
    }
}

impl fmt::Display for TileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of tile, emitted as the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileType {
    #[serde(rename = "TRAVISCI-BUILD")]
    TravisCiBuild,
}

/// Commit author attached to a build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub name: String,
    pub avatar_url: String,
}

impl Author {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.avatar_url.is_empty()
    }
}

/// A renderable status unit for one monitored repository/branch.
///
/// `duration` and `estimated_duration` are whole seconds and are only set
/// while the build is running.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
    #[serde(rename = "type")]
    pub tile_type: TileType,

    pub label: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TileStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_status: Option<TileStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
}

impl Tile {
    /// Create an empty tile carrying only its type.
    pub fn new(tile_type: TileType) -> Self {
        Self {
            tile_type,
            label: String::new(),
            message: String::new(),
            status: None,
            previous_status: None,
            started_at: None,
            finished_at: None,
            duration: None,
            estimated_duration: None,
            author: None,
        }
    }
}
