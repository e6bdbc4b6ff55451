//! Travis CI API v3 response models.
//!
//! These structs map to the JSON payloads of the `/repo/{slug}/builds`
//! endpoint. They are internal to the adapter; the rest of the crate only
//! sees [`BuildRecord`].

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;

use crate::domain::models::{Author, BuildRecord};

/// Page of builds returned by `/repo/{slug}/builds`.
#[derive(Debug, Clone, Deserialize)]
pub struct TravisBuildsPage {
    #[serde(default)]
    pub builds: Vec<TravisBuild>,
}

/// A single build in standard representation.
#[derive(Debug, Clone, Deserialize)]
pub struct TravisBuild {
    pub id: u64,
    /// One of created, received, started, passed, failed, errored, canceled.
    pub state: String,
    /// Wall-clock seconds; null while the build is still running.
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_by: Option<TravisUser>,
}

/// The user that triggered a build.
#[derive(Debug, Clone, Deserialize)]
pub struct TravisUser {
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl From<TravisBuild> for BuildRecord {
    fn from(build: TravisBuild) -> Self {
        let author = build.created_by.map(|user| Author {
            name: user.login,
            avatar_url: user.avatar_url.unwrap_or_default(),
        });

        Self {
            id: build.id.to_string(),
            state: build.state,
            started_at: build.started_at,
            finished_at: build.finished_at,
            duration: Duration::from_secs(build.duration.unwrap_or(0)),
            author,
        }
    }
}
