//! Periodic polling of every configured tile.
//!
//! Each round polls all targets concurrently against the shared
//! [`BuildTileService`] and publishes the results on a channel. A failed
//! tile is reported and polled again on the next tick; there is no retry
//! inside a round.

use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::{interval, MissedTickBehavior};

use crate::domain::errors::TileError;
use crate::domain::models::{BuildParams, Tile};
use crate::services::build_tile_service::BuildTileService;

/// Results of one polling round, in target order.
#[derive(Debug)]
pub struct PollRound {
    pub round: u64,
    pub results: Vec<Result<Tile, TileError>>,
}

impl PollRound {
    pub fn failures(&self) -> usize {
        self.results.iter().filter(|result| result.is_err()).count()
    }
}

/// Polls a fixed set of targets on an interval.
pub struct TilePoller {
    service: Arc<BuildTileService>,
    targets: Vec<BuildParams>,
}

impl TilePoller {
    pub fn new(service: Arc<BuildTileService>, targets: Vec<BuildParams>) -> Self {
        Self { service, targets }
    }

    /// Poll every target once, concurrently.
    pub async fn poll_once(&self) -> Vec<Result<Tile, TileError>> {
        join_all(self.targets.iter().map(|params| self.service.build(params))).await
    }

    /// Poll until `shutdown` becomes `true` or its sender is dropped, or
    /// until the receiving side of `tx` goes away.
    pub async fn run(
        &self,
        every: Duration,
        tx: mpsc::Sender<PollRound>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut round = 0u64;

        tracing::info!(
            targets = self.targets.len(),
            interval_secs = every.as_secs(),
            "tile poller started"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    round += 1;
                    let results = self.poll_once().await;
                    let poll_round = PollRound { round, results };
                    tracing::debug!(
                        round,
                        failures = poll_round.failures(),
                        "poll round complete"
                    );
                    if tx.send(poll_round).await.is_err() {
                        break;
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        tracing::info!(rounds = round, "tile poller stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::cache::BuildHistoryCache;
    use crate::domain::errors::DomainResult;
    use crate::domain::models::{BuildRecord, TileStatus};
    use crate::domain::ports::StatusProvider;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Answers `passed` for every repository except `missing`.
    struct FixedProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl StatusProvider for FixedProvider {
        async fn last_build(
            &self,
            _group: &str,
            repository: &str,
            _branch: &str,
        ) -> DomainResult<Option<BuildRecord>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if repository == "missing" {
                return Ok(None);
            }
            Ok(Some(BuildRecord {
                id: call.to_string(),
                state: "passed".to_string(),
                started_at: None,
                finished_at: None,
                duration: Duration::from_secs(60),
                author: None,
            }))
        }
    }

    fn poller(targets: Vec<BuildParams>) -> (TilePoller, Arc<FixedProvider>) {
        let provider = Arc::new(FixedProvider {
            calls: AtomicUsize::new(0),
        });
        let service = Arc::new(BuildTileService::new(
            provider.clone(),
            Arc::new(BuildHistoryCache::default()),
        ));
        (TilePoller::new(service, targets), provider)
    }

    #[tokio::test]
    async fn test_poll_once_keeps_target_order() {
        let (poller, provider) = poller(vec![
            BuildParams::new("org", "api", "main"),
            BuildParams::new("org", "missing", "main"),
            BuildParams::new("org", "web", "main"),
        ]);

        let results = poller.poll_once().await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().label, "api");
        assert!(results[1].as_ref().unwrap_err().is_warning());
        assert_eq!(
            results[2].as_ref().unwrap().status,
            Some(TileStatus::Success)
        );
        assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let (poller, _) = poller(vec![BuildParams::new("org", "api", "main")]);
        let (tx, mut rx) = mpsc::channel(8);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            poller.run(Duration::from_millis(10), tx, shutdown_rx).await;
        });

        let first = rx.recv().await.unwrap();
        assert_eq!(first.round, 1);
        assert_eq!(first.failures(), 0);

        let second = rx.recv().await.unwrap();
        assert_eq!(second.round, 2);
        assert_eq!(
            second.results[0].as_ref().unwrap().previous_status,
            Some(TileStatus::Success)
        );

        shutdown_tx.send(true).unwrap();
        drop(rx);
        handle.await.unwrap();
    }
}
