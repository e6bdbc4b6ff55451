//! Build records returned by a status provider, and the parameters that
//! identify which build to ask for.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::tile::Author;
use crate::domain::errors::{DomainError, DomainResult};

/// The most recent build of a repository/branch, as reported by a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRecord {
    /// Provider build identifier, kept opaque.
    pub id: String,
    /// Provider-specific textual state (e.g. `"passed"`).
    pub state: String,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub duration: Duration,
    pub author: Option<Author>,
}

/// Identifies one monitored target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BuildParams {
    /// Owner or organisation of the repository.
    pub group: String,
    pub repository: String,
    pub branch: String,
}

impl BuildParams {
    pub fn new(
        group: impl Into<String>,
        repository: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            repository: repository.into(),
            branch: branch.into(),
        }
    }

    /// Reject parameters with blank fields.
    pub fn validate(&self) -> DomainResult<()> {
        for (field, value) in [
            ("group", &self.group),
            ("repository", &self.repository),
            ("branch", &self.branch),
        ] {
            if value.trim().is_empty() {
                return Err(DomainError::ValidationFailed(format!(
                    "{field} cannot be empty"
                )));
            }
        }
        Ok(())
    }

    /// Tile label shown on the dashboard.
    pub fn label(&self) -> String {
        self.repository.clone()
    }

    /// Build history key: one history per repository and branch.
    pub fn tile_key(&self) -> String {
        format!("{}/{}#{}", self.group, self.repository, self.branch)
    }

    /// Branch as shown under the label: `refs/heads/main` becomes `#main`.
    pub fn humanized_branch(&self) -> String {
        let branch = self
            .branch
            .strip_prefix("refs/heads/")
            .unwrap_or(&self.branch);
        format!("#{branch}")
    }
}
