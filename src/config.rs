use crate::report::DEFAULT_MOVEMENT_LIMIT;
use anyhow::{ensure, Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug, Default)]
#[clap(name = "heartbeat-watch", version, about)]
pub struct Cli {
    /// Path to an optional TOML configuration file
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Override the watched log file
    #[clap(long)]
    pub log_file: Option<PathBuf>,

    /// Override the refresh interval in milliseconds
    #[clap(long)]
    pub interval_ms: Option<u64>,

    /// Override how many recent movements are listed
    #[clap(long)]
    pub movement_limit: Option<usize>,

    /// Write the counter lines to the export file and exit
    #[clap(long)]
    pub export: bool,

    /// Override the export file path
    #[clap(long)]
    pub export_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub log_file: PathBuf,
    pub interval_ms: u64,
    pub movement_limit: usize,
    pub export_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from("out.log"),
            interval_ms: 1000,
            movement_limit: DEFAULT_MOVEMENT_LIMIT,
            export_file: PathBuf::from("counts.log"),
        }
    }
}

impl Config {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

pub fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match cli.config {
        Some(ref path) => {
            let config_content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str::<Config>(&config_content).context("Failed to parse config file")?
        }
        None => Config::default(),
    };

    // Apply CLI overrides
    if let Some(ref log_file) = cli.log_file {
        config.log_file = log_file.clone();
    }

    if let Some(interval_ms) = cli.interval_ms {
        config.interval_ms = interval_ms;
    }

    if let Some(movement_limit) = cli.movement_limit {
        config.movement_limit = movement_limit;
    }

    if let Some(ref export_file) = cli.export_file {
        config.export_file = export_file.clone();
    }

    ensure!(config.interval_ms > 0, "interval_ms must be greater than zero");

    Ok(config)
}
