use crate::detector;
use crate::display::DisplaySink;
use crate::error::WatchError;
use crate::parser;
use crate::report;
use crate::timestamp::{format_wall_clock, humanize};
use async_trait::async_trait;
use chrono::{DateTime, Local};
use log::{debug, info};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::time::{interval, MissedTickBehavior};

/// Produces the full text of the watched log on every cycle.
#[async_trait]
pub trait LogSource: Send + Sync {
    async fn read(&self) -> Result<String, WatchError>;
}

/// Reads the log from the local filesystem.
pub struct FileLogSource {
    path: PathBuf,
}

impl FileLogSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl LogSource for FileLogSource {
    async fn read(&self) -> Result<String, WatchError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| WatchError::Read {
                path: self.path.clone(),
                source,
            })
    }
}

/// One status frame: `<M/D/YY h:mm:ss a>: <report>`.
pub fn render_status(text: &str, now: &DateTime<Local>, movement_limit: usize) -> String {
    let lines = parser::parse_log(text);

    if log::log_enabled!(log::Level::Debug) {
        if let Some(span) = detector::scan(&lines).and_then(|scan| scan.span()) {
            debug!(
                "Parsed {} lines, counter heartbeats cover {}",
                lines.len(),
                humanize(span)
            );
        }
    }

    format!(
        "{}: {}",
        format_wall_clock(now),
        report::build_report(&lines, movement_limit)
    )
}

/// Refresh the display every `period` until a cycle fails.
///
/// Cycles run as independent tasks and may overlap when a read is slow; the
/// sink simply shows whichever frame finished last. The first failure from
/// any cycle is returned.
pub async fn run<S, D>(
    source: Arc<S>,
    sink: Arc<Mutex<D>>,
    period: Duration,
    movement_limit: usize,
) -> Result<(), WatchError>
where
    S: LogSource + 'static,
    D: DisplaySink + 'static,
{
    let (failure_tx, mut failure_rx) = mpsc::unbounded_channel();
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!("Refreshing every {:?}", period);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let source = Arc::clone(&source);
                let sink = Arc::clone(&sink);
                let failures = failure_tx.clone();

                tokio::spawn(async move {
                    if let Err(e) = refresh(source.as_ref(), &sink, movement_limit).await {
                        let _ = failures.send(e);
                    }
                });
            }
            Some(e) = failure_rx.recv() => {
                debug!("Watch cycle failed: {}", e);
                return Err(e);
            }
        }
    }
}

async fn refresh<S, D>(source: &S, sink: &Mutex<D>, movement_limit: usize) -> Result<(), WatchError>
where
    S: LogSource + ?Sized,
    D: DisplaySink,
{
    let text = source.read().await?;
    let frame = render_status(&text, &Local::now(), movement_limit);
    sink.lock().await.show(&frame)?;
    Ok(())
}
