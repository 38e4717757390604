mod config;
mod detector;
mod display;
mod error;
mod export;
mod parser;
mod report;
mod timestamp;
mod types;
mod watcher;

use anyhow::Result;
use clap::Parser;
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use std::sync::Arc;
use tokio::sync::Mutex;

#[tokio::main]
async fn main() -> Result<()> {
    // Stay quiet below warnings so log output doesn't fight the live display.
    SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .env()
        .init()?;

    // Parse command-line arguments
    let cli = config::Cli::parse();

    // Load configuration
    let config = config::load_config(&cli)?;
    info!("Watching {:?}", config.log_file);

    let source = Arc::new(watcher::FileLogSource::new(config.log_file.clone()));

    if cli.export {
        let count = export::export_counter_lines(source.as_ref(), &config.export_file).await?;
        info!("Export finished with {} lines", count);
        return Ok(());
    }

    let sink = Arc::new(Mutex::new(display::TerminalSink::stdout()));
    watcher::run(source, sink, config.interval(), config.movement_limit).await?;

    Ok(())
}
