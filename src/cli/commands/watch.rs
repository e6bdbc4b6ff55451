//! Implementation of the `tilewatch watch` command.

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

use crate::cli::commands::tile_service;
use crate::cli::output::{output, CommandOutput, TileReport};
use crate::cli::table::TileTableFormatter;
use crate::domain::models::Config;
use crate::services::{PollRound, TilePoller};

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Seconds between rounds (overrides poll.interval_secs)
    #[arg(long, short)]
    pub interval: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct RoundOutput {
    pub round: u64,
    pub tiles: Vec<TileReport>,
}

impl From<PollRound> for RoundOutput {
    fn from(round: PollRound) -> Self {
        Self {
            round: round.round,
            tiles: round.results.into_iter().map(TileReport::from).collect(),
        }
    }
}

impl CommandOutput for RoundOutput {
    fn to_human(&self) -> String {
        format!(
            "Round {}\n{}",
            self.round,
            TileTableFormatter::new().format(&self.tiles)
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: WatchArgs, config: &Config, json_mode: bool) -> Result<()> {
    if config.tiles.is_empty() {
        bail!("No tiles configured. Add entries under `tiles:` in .tilewatch/config.yaml");
    }

    let every = Duration::from_secs(args.interval.unwrap_or(config.poll.interval_secs));
    if every.is_zero() {
        bail!("Interval must be at least 1 second");
    }

    let poller = TilePoller::new(tile_service(config)?, config.tiles.clone());
    let (tx, mut rx) = mpsc::channel::<PollRound>(16);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let handle = tokio::spawn(async move {
        poller.run(every, tx, shutdown_rx).await;
    });

    loop {
        tokio::select! {
            round = rx.recv() => match round {
                Some(round) => output(&RoundOutput::from(round), json_mode),
                None => break,
            },
            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to listen for Ctrl-C")?;
                tracing::info!("interrupt received, stopping");
                let _ = shutdown_tx.send(true);
                break;
            }
        }
    }

    drop(rx);
    handle.await.context("Tile poller task failed")?;
    Ok(())
}
