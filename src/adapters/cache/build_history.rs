//! Bounded per-tile history of terminal build outcomes.
//!
//! Backs the two things a provider cannot answer from a single build
//! record: the status of the build before the current one, and how long a
//! running build is expected to take. Each tile keeps at most `capacity`
//! outcomes; the oldest one is evicted on overflow, in insertion order.

use std::collections::{HashMap, VecDeque};
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use crate::domain::models::TileStatus;

/// Outcomes retained per tile when nothing else is configured.
pub const DEFAULT_CAPACITY: usize = 5;

/// One recorded terminal build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
    pub build_id: String,
    pub status: TileStatus,
    pub duration: Duration,
}

/// Shared build history, keyed by tile key (repository and branch).
///
/// A single lock guards the whole map. Every operation is in-memory and at
/// worst linear in `capacity`, so pollers never hold it for long.
#[derive(Debug)]
pub struct BuildHistoryCache {
    capacity: usize,
    histories: RwLock<HashMap<String, VecDeque<BuildOutcome>>>,
}

impl BuildHistoryCache {
    /// Create an empty cache retaining `capacity` outcomes per key.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            histories: RwLock::new(HashMap::new()),
        }
    }

    /// Record a terminal outcome for `key`.
    ///
    /// Only `Success` and `Failed` are recorded; anything else is dropped.
    /// The same build id may be recorded more than once.
    pub fn add(
        &self,
        key: &str,
        build_id: impl Into<String>,
        status: TileStatus,
        duration: Duration,
    ) {
        if !status.is_terminal() {
            tracing::debug!(key, %status, "ignoring non-terminal outcome");
            return;
        }

        let build_id = build_id.into();
        let mut histories = self
            .histories
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let history = histories
            .entry(key.to_string())
            .or_insert_with(|| VecDeque::with_capacity(self.capacity + 1));

        history.push_back(BuildOutcome {
            build_id,
            status,
            duration,
        });
        while history.len() > self.capacity {
            history.pop_front();
        }
    }

    /// Status of the latest recorded outcome for `key` that is not
    /// `current_build_id`.
    pub fn previous_status(&self, key: &str, current_build_id: &str) -> Option<TileStatus> {
        let histories = self
            .histories
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        histories
            .get(key)?
            .iter()
            .rev()
            .find(|outcome| outcome.build_id != current_build_id)
            .map(|outcome| outcome.status)
    }

    /// Mean duration of the outcomes currently retained for `key`.
    pub fn estimated_duration(&self, key: &str) -> Option<Duration> {
        let histories = self
            .histories
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let history = histories.get(key)?;
        if history.is_empty() {
            return None;
        }

        let total: Duration = history.iter().map(|outcome| outcome.duration).sum();
        let count = u32::try_from(history.len()).ok()?;
        Some(total / count)
    }

    /// Snapshot of the outcomes retained for `key`, oldest first.
    pub fn history(&self, key: &str) -> Vec<BuildOutcome> {
        let histories = self
            .histories
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        histories
            .get(key)
            .map(|history| history.iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl Default for BuildHistoryCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
