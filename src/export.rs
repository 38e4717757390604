use crate::detector;
use crate::error::WatchError;
use crate::parser;
use crate::watcher::LogSource;
use log::info;
use std::path::Path;

/// Write the raw text of every counter line to `destination`, one per line.
///
/// Returns how many lines were written.
pub async fn export_counter_lines(
    source: &dyn LogSource,
    destination: &Path,
) -> Result<usize, WatchError> {
    let text = source.read().await?;
    let lines = parser::parse_log(&text);
    let counters = detector::counter_lines(&lines);

    let body = counters
        .iter()
        .map(|line| line.original.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    tokio::fs::write(destination, body)
        .await
        .map_err(|source| WatchError::Export {
            path: destination.to_path_buf(),
            source,
        })?;

    info!("Exported {} counter lines to {:?}", counters.len(), destination);
    Ok(counters.len())
}
