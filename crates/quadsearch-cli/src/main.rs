use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use quadsearch_cli::{
    cli::{Cli, Commands},
    commands, logging,
};
use quadsearch_config::ConfigLoader;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::load_or_default(cli.config.as_deref())
        .await
        .context("Failed to load configuration")?;

    logging::init(&logging::directive(cli.requested_level(), &config.logging));
    debug!("Configuration loaded: {:?}", config);

    match cli.command {
        Commands::Search {
            query,
            data,
            limit,
            format,
            pull,
        } => commands::search::execute(&config, query, data, limit, format, pull).await,
        Commands::Snapshot { data, strategy } => commands::snapshot::execute(data, strategy).await,
        Commands::Skolem {
            statement,
            canonical,
        } => commands::skolem::execute(statement, canonical).await,
        Commands::Config { format } => commands::config::execute(&config, format).await,
    }
}
