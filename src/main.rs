//! tilewatch CLI entry point.

use clap::Parser;

use tilewatch::cli::commands::load_config;
use tilewatch::cli::{Cli, Commands};
use tilewatch::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => tilewatch::cli::handle_error(err, cli.json),
    };

    let _logger = match LogConfig::try_from(&config.logging).and_then(|c| LoggerImpl::init(&c)) {
        Ok(logger) => logger,
        Err(err) => tilewatch::cli::handle_error(err, cli.json),
    };

    let result = match cli.command {
        Commands::Build(args) => {
            tilewatch::cli::commands::build::execute(args, &config, cli.json).await
        }
        Commands::Watch(args) => {
            tilewatch::cli::commands::watch::execute(args, &config, cli.json).await
        }
        Commands::Config => tilewatch::cli::commands::config::execute(&config, cli.json),
    };

    if let Err(err) = result {
        tilewatch::cli::handle_error(err, cli.json);
    }
}
