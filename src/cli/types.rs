//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::commands::build::BuildArgs;
use crate::cli::commands::watch::WatchArgs;

#[derive(Parser)]
#[command(name = "tilewatch")]
#[command(about = "tilewatch - CI build status tiles", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to .tilewatch/config.yaml merged with local.yaml)
    #[arg(short, long, global = true, env = "TILEWATCH_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Poll one repository/branch once and print its tile
    Build(BuildArgs),

    /// Poll every configured tile until interrupted
    Watch(WatchArgs),

    /// Print the effective configuration
    Config,
}
