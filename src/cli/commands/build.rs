//! Implementation of the `tilewatch build` command.

use anyhow::Result;
use clap::Args;

use crate::cli::commands::tile_service;
use crate::cli::output::{output, TileReport};
use crate::domain::errors::Severity;
use crate::domain::models::{BuildParams, Config};

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Repository owner or organisation
    #[arg(long, short)]
    pub group: String,

    /// Repository name
    #[arg(long, short)]
    pub repository: String,

    /// Branch to report on
    #[arg(long, short, default_value = "master")]
    pub branch: String,
}

pub async fn execute(args: BuildArgs, config: &Config, json_mode: bool) -> Result<()> {
    let service = tile_service(config)?;
    let params = BuildParams::new(args.group, args.repository, args.branch);

    match service.build(&params).await {
        Ok(tile) => output(&TileReport::from(Ok(tile)), json_mode),
        Err(err) if err.severity == Severity::Warning => {
            output(&TileReport::from(Err(err)), json_mode);
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
