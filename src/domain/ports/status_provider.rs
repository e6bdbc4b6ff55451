//! Status provider port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::BuildRecord;

/// Source of the latest build for a repository/branch.
///
/// `Ok(None)` means the provider answered but has no build for the branch;
/// `Err` means the provider could not be reached or understood.
#[async_trait]
pub trait StatusProvider: Send + Sync {
    /// Fetch the most recent build.
    async fn last_build(
        &self,
        group: &str,
        repository: &str,
        branch: &str,
    ) -> DomainResult<Option<BuildRecord>>;
}
