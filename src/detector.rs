//! Heartbeat drift detection.
//!
//! The counter heartbeat is expected to land on the same second/millisecond
//! phase every time it fires. The first counter line in the file fixes that
//! phase, and every counter line whose phase differs is a movement. Only the
//! raw fields are compared, so drift across whole minutes is not visible.

use crate::timestamp::{Phase, Timestamp};
use crate::types::LogLine;
use chrono::TimeDelta;

/// Result of scanning one snapshot of the log.
#[derive(Debug)]
pub struct Scan<'a> {
    /// Every counter line, in file order. Never empty.
    pub counters: Vec<&'a LogLine>,
    /// Phase of the first counter line, `None` if its timestamp did not parse.
    pub baseline: Option<Phase>,
    /// Counter lines off the baseline phase, in file order.
    pub movements: Vec<&'a LogLine>,
}

/// `INFO` lines with a structured `CT` message, in file order.
pub fn counter_lines(lines: &[LogLine]) -> Vec<&LogLine> {
    lines.iter().filter(|line| line.is_counter()).collect()
}

/// Returns `None` when the log has no counter lines yet.
pub fn scan(lines: &[LogLine]) -> Option<Scan<'_>> {
    let counters = counter_lines(lines);
    let first = counters.first()?;
    let baseline = first.timestamp().and_then(Timestamp::phase);

    let movements = counters
        .iter()
        .copied()
        .filter(|line| has_moved(line, baseline.as_ref()))
        .collect();

    Some(Scan {
        counters,
        baseline,
        movements,
    })
}

/// Unparseable timestamps on either side always count as moved.
fn has_moved(line: &LogLine, baseline: Option<&Phase>) -> bool {
    match (line.timestamp().and_then(Timestamp::phase), baseline) {
        (Some(phase), Some(baseline)) => {
            phase.millis != baseline.millis || phase.seconds != baseline.seconds
        }
        _ => true,
    }
}

impl Scan<'_> {
    /// Raw `(seconds, millis)` offset of a line from the baseline.
    pub fn offset(&self, line: &LogLine) -> Option<(i64, i64)> {
        let phase = line.timestamp().and_then(Timestamp::phase)?;
        Some(phase.delta(self.baseline.as_ref()?))
    }

    /// Elapsed time between the first and last counter line.
    pub fn span(&self) -> Option<TimeDelta> {
        let first = self.counters.first()?.timestamp()?;
        let last = self.counters.last()?.timestamp()?;
        last.since(first)
    }
}
