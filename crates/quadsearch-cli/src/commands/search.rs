use anyhow::Result;
use colored::Colorize;
use comfy_table::{Cell, Color, Table};
use quadsearch_config::QuadsearchConfig;
use quadsearch_core::RankedResult;
use std::path::PathBuf;
use tracing::info;

use crate::cli::OutputFormat;
use crate::pipeline::Pipeline;

/// Load data, then search it
pub async fn execute(
    config: &QuadsearchConfig,
    query: String,
    data: Vec<PathBuf>,
    limit: Option<usize>,
    format: OutputFormat,
    pull: bool,
) -> Result<()> {
    let pipeline = Pipeline::new(config)?;

    if pull {
        let loaded = pipeline.load_silently(&data).await?;
        let stats = pipeline.rebuild().await?;
        info!(
            loaded,
            batches = stats.batches,
            upserted = stats.upserted,
            "Populated index by pull"
        );
    } else {
        let loaded = pipeline.load(&data).await?;
        info!(loaded, "Populated index through change capture");
    }

    let results = pipeline.search(&query, limit).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
        OutputFormat::Table => print_table(&query, &results),
    }

    Ok(())
}

fn print_table(query: &str, results: &[RankedResult]) {
    if results.is_empty() {
        println!("{} No results for \"{}\"", "Empty:".yellow().bold(), query);
        return;
    }

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Rank", "Score", "Subject"]);

    for (rank, result) in results.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(format!("{:.4}", result.score)).fg(Color::Green),
            Cell::new(result.value.as_str()),
        ]);
    }

    println!("{}", table);
    println!(
        "{}",
        format!("{} result(s) for \"{}\"", results.len(), query).dimmed()
    );
}
