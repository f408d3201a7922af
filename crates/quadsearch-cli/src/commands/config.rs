use anyhow::Result;
use colored::Colorize;
use quadsearch_config::QuadsearchConfig;

use crate::cli::OutputFormat;

/// Show the effective configuration
pub async fn execute(config: &QuadsearchConfig, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
        OutputFormat::Table => {
            println!("{}", "# Effective configuration".dimmed());
            print!("{}", config.to_toml()?);
        }
    }
    Ok(())
}
