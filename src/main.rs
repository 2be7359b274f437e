use anyhow::{bail, Context};
use clap::Parser;
use log::LevelFilter;
use resize_batch::{BatchProcessor, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .format_timestamp(None)
        .init();

    let config = cli.to_config();
    let processor = BatchProcessor::new(config).context("Invalid configuration")?;

    let stats = processor
        .process_directory(&cli.source, &cli.destination)
        .with_context(|| format!("Batch aborted while writing to {}", cli.destination.display()))?;

    if stats.has_errors() {
        bail!("{} of {} files failed", stats.errors.len(), stats.processed_count + stats.errors.len());
    }

    Ok(())
}
