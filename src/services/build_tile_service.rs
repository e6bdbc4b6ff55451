//! Build tile orchestration.
//!
//! Resolves the latest build through a [`StatusProvider`], normalizes it into
//! a [`Tile`], and keeps the shared [`BuildHistoryCache`] up to date with
//! terminal outcomes.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::adapters::cache::BuildHistoryCache;
use crate::domain::errors::TileError;
use crate::domain::models::{BuildParams, Tile, TileStatus, TileType};
use crate::domain::ports::StatusProvider;
use crate::services::state_mapping::parse_state;

/// Builds Travis CI tiles backed by a shared build history.
pub struct BuildTileService {
    provider: Arc<dyn StatusProvider>,
    history: Arc<BuildHistoryCache>,
}

impl BuildTileService {
    pub fn new(provider: Arc<dyn StatusProvider>, history: Arc<BuildHistoryCache>) -> Self {
        Self { provider, history }
    }

    /// Poll the provider once and render the result.
    pub async fn build(&self, params: &BuildParams) -> Result<Tile, TileError> {
        self.build_at(params, Utc::now()).await
    }

    /// Same as [`build`](Self::build), measuring running durations against `now`.
    #[tracing::instrument(
        skip(self, params),
        fields(repository = %params.repository, branch = %params.branch)
    )]
    pub async fn build_at(
        &self,
        params: &BuildParams,
        now: DateTime<Utc>,
    ) -> Result<Tile, TileError> {
        let key = params.tile_key();
        let mut tile = Tile::new(TileType::TravisCiBuild);
        tile.label = params.label();
        tile.message = params.humanized_branch();

        if let Err(err) = params.validate() {
            return Err(TileError::invalid_params(tile, err));
        }

        let build = match self
            .provider
            .last_build(&params.group, &params.repository, &params.branch)
            .await
        {
            Ok(Some(build)) => build,
            Ok(None) => {
                tracing::warn!("no build found");
                return Err(TileError::no_build(tile));
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to fetch build");
                return Err(TileError::fetch_failed(tile, err));
            }
        };

        let status = parse_state(&build.state);
        tile.status = Some(status);
        tile.previous_status = Some(
            self.history
                .previous_status(&key, &build.id)
                .unwrap_or(TileStatus::Unknown),
        );
        tile.started_at = build.started_at;
        tile.finished_at = build.finished_at;

        if status == TileStatus::Running {
            tile.duration = build
                .started_at
                .map(|started_at| (now - started_at).num_seconds());

            let estimated = self
                .history
                .estimated_duration(&key)
                .unwrap_or_default();
            tile.estimated_duration = Some(i64::try_from(estimated.as_secs()).unwrap_or(i64::MAX));
        }

        tile.author = build.author.filter(|author| !author.is_empty());

        if status.is_terminal() {
            tracing::info!(
                build_id = %build.id,
                %status,
                duration_secs = build.duration.as_secs(),
                "recording build outcome"
            );
            self.history.add(&key, build.id, status, build.duration);
        }

        Ok(tile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{DomainError, DomainResult, Severity};
    use crate::domain::models::{Author, BuildRecord};
    use async_trait::async_trait;
    use chrono::Duration as ChronoDuration;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Provider returning queued responses in order.
    struct ScriptedProvider {
        responses: Mutex<Vec<DomainResult<Option<BuildRecord>>>>,
    }

    impl ScriptedProvider {
        fn new(mut responses: Vec<DomainResult<Option<BuildRecord>>>) -> Self {
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
            }
        }
    }

    #[async_trait]
    impl StatusProvider for ScriptedProvider {
        async fn last_build(
            &self,
            _group: &str,
            _repository: &str,
            _branch: &str,
        ) -> DomainResult<Option<BuildRecord>> {
            self.responses
                .lock()
                .unwrap()
                .pop()
                .unwrap_or(Ok(None))
        }
    }

    fn record(id: &str, state: &str, duration_secs: u64) -> BuildRecord {
        BuildRecord {
            id: id.to_string(),
            state: state.to_string(),
            started_at: None,
            finished_at: None,
            duration: Duration::from_secs(duration_secs),
            author: None,
        }
    }

    fn service(
        responses: Vec<DomainResult<Option<BuildRecord>>>,
    ) -> (BuildTileService, Arc<BuildHistoryCache>) {
        let history = Arc::new(BuildHistoryCache::default());
        let service = BuildTileService::new(
            Arc::new(ScriptedProvider::new(responses)),
            Arc::clone(&history),
        );
        (service, history)
    }

    fn params() -> BuildParams {
        BuildParams::new("monitoror", "monitoror", "master")
    }

    const KEY: &str = "monitoror/monitoror#master";

    #[tokio::test]
    async fn test_running_build_without_history() {
        let now = Utc::now();
        let mut build = record("10", "started", 0);
        build.started_at = Some(now - ChronoDuration::seconds(30));
        let (service, history) = service(vec![Ok(Some(build))]);

        let tile = service.build_at(&params(), now).await.unwrap();

        assert_eq!(tile.label, "monitoror");
        assert_eq!(tile.message, "#master");
        assert_eq!(tile.status, Some(TileStatus::Running));
        assert_eq!(tile.previous_status, Some(TileStatus::Unknown));
        assert_eq!(tile.duration, Some(30));
        assert_eq!(tile.estimated_duration, Some(0));
        assert!(history.history(KEY).is_empty());
    }

    #[tokio::test]
    async fn test_running_build_uses_history_estimate() {
        let now = Utc::now();
        let mut running = record("4", "started", 0);
        running.started_at = Some(now - ChronoDuration::seconds(5));
        let (service, history) = service(vec![Ok(Some(running))]);
        history.add(KEY, "1", TileStatus::Success, Duration::from_secs(100));
        history.add(KEY, "2", TileStatus::Failed, Duration::from_secs(200));

        let tile = service.build_at(&params(), now).await.unwrap();

        assert_eq!(tile.previous_status, Some(TileStatus::Failed));
        assert_eq!(tile.estimated_duration, Some(150));
        assert_eq!(tile.duration, Some(5));
    }

    #[tokio::test]
    async fn test_running_build_without_start_has_no_duration() {
        let (service, _) = service(vec![Ok(Some(record("4", "started", 0)))]);
        let tile = service.build(&params()).await.unwrap();
        assert_eq!(tile.duration, None);
        assert_eq!(tile.estimated_duration, Some(0));
    }

    #[tokio::test]
    async fn test_terminal_build_is_recorded() {
        let (service, history) = service(vec![
            Ok(Some(record("11", "passed", 90))),
            Ok(Some(record("12", "errored", 30))),
        ]);

        let first = service.build(&params()).await.unwrap();
        assert_eq!(first.status, Some(TileStatus::Success));
        assert_eq!(first.previous_status, Some(TileStatus::Unknown));
        assert_eq!(first.duration, None);
        assert_eq!(first.estimated_duration, None);

        let second = service.build(&params()).await.unwrap();
        assert_eq!(second.status, Some(TileStatus::Failed));
        assert_eq!(second.previous_status, Some(TileStatus::Success));

        assert_eq!(history.history(KEY).len(), 2);
        assert_eq!(
            history.estimated_duration(KEY),
            Some(Duration::from_secs(60))
        );
    }

    #[tokio::test]
    async fn test_repolling_terminal_build_keeps_previous_status() {
        let (service, history) = service(vec![
            Ok(Some(record("11", "failed", 90))),
            Ok(Some(record("12", "passed", 90))),
            Ok(Some(record("12", "passed", 90))),
        ]);

        service.build(&params()).await.unwrap();
        service.build(&params()).await.unwrap();
        let repoll = service.build(&params()).await.unwrap();

        assert_eq!(repoll.previous_status, Some(TileStatus::Failed));
        assert_eq!(history.history(KEY).len(), 3);
    }

    #[tokio::test]
    async fn test_non_terminal_states_do_not_touch_history() {
        let (service, history) = service(vec![
            Ok(Some(record("1", "created", 0))),
            Ok(Some(record("1", "canceled", 0))),
            Ok(Some(record("1", "mystery", 0))),
        ]);

        assert_eq!(
            service.build(&params()).await.unwrap().status,
            Some(TileStatus::Queued)
        );
        assert_eq!(
            service.build(&params()).await.unwrap().status,
            Some(TileStatus::Aborted)
        );
        assert_eq!(
            service.build(&params()).await.unwrap().status,
            Some(TileStatus::Unknown)
        );
        assert!(history.history(KEY).is_empty());
    }

    #[tokio::test]
    async fn test_no_build_is_a_warning() {
        let (service, _) = service(vec![Ok(None)]);
        let err = service.build(&params()).await.unwrap_err();

        assert_eq!(err.severity, Severity::Warning);
        assert!(err.source.is_none());
        assert_eq!(err.tile.label, "monitoror");
        assert_eq!(err.tile.message, "#master");
        assert_eq!(err.tile.status, None);
    }

    #[tokio::test]
    async fn test_provider_failure_is_an_error() {
        let (service, history) = service(vec![Err(DomainError::ProviderRequest(
            "connection refused".to_string(),
        ))]);
        let err = service.build(&params()).await.unwrap_err();

        assert_eq!(err.severity, Severity::Error);
        assert!(matches!(err.source, Some(DomainError::ProviderRequest(_))));
        assert_eq!(err.tile.status, None);
        assert!(history.history(KEY).is_empty());
    }

    #[tokio::test]
    async fn test_invalid_params_skip_provider() {
        let (service, _) = service(vec![Ok(Some(record("1", "passed", 1)))]);
        let err = service
            .build(&BuildParams::new("monitoror", "monitoror", " "))
            .await
            .unwrap_err();

        assert_eq!(err.severity, Severity::Error);
        assert!(matches!(err.source, Some(DomainError::ValidationFailed(_))));
    }

    #[tokio::test]
    async fn test_author_only_when_present() {
        let mut with_author = record("1", "passed", 1);
        with_author.author = Some(Author {
            name: "jsdidierlaurent".to_string(),
            avatar_url: String::new(),
        });
        let mut empty_author = record("2", "passed", 1);
        empty_author.author = Some(Author::default());

        let (service, _) = service(vec![Ok(Some(with_author)), Ok(Some(empty_author))]);

        let tile = service.build(&params()).await.unwrap();
        assert_eq!(tile.author.unwrap().name, "jsdidierlaurent");

        let tile = service.build(&params()).await.unwrap();
        assert!(tile.author.is_none());
    }

    #[tokio::test]
    async fn test_branches_keep_separate_histories() {
        let (service, history) = service(vec![
            Ok(Some(record("2", "failed", 300))),
            Ok(Some(record("3", "passed", 60))),
        ]);
        let feature = BuildParams::new("monitoror", "monitoror", "feature");

        service.build(&feature).await.unwrap();
        let master = service.build(&params()).await.unwrap();

        assert_eq!(master.label, "monitoror");
        assert_eq!(master.previous_status, Some(TileStatus::Unknown));
        assert_eq!(history.history(&feature.tile_key()).len(), 1);
        assert_eq!(
            history.estimated_duration(KEY),
            Some(Duration::from_secs(60))
        );
    }
}
