//! Timestamp parsing and the few pieces of date arithmetic the watcher needs.

use chrono::{
    DateTime, FixedOffset, Local, LocalResult, NaiveDate, NaiveDateTime, TimeDelta, TimeZone,
    Timelike,
};

/// Longest timestamp token that is considered; anything past this is dropped.
pub const MAX_TIMESTAMP_CHARS: usize = 20;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    // ISO 8601 basic form, short enough to keep milliseconds within the token limit
    "%Y%m%dT%H%M%S%.f",
];

/// A parsed log timestamp.
///
/// Tokens that don't look like a date keep their raw text in `Invalid`
/// instead of failing the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timestamp {
    Valid(DateTime<FixedOffset>),
    Invalid(String),
}

/// Position of an instant inside its minute: whole seconds plus milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phase {
    pub seconds: i64,
    pub millis: i64,
}

impl Phase {
    /// Raw field differences, no wraparound correction.
    pub fn delta(&self, baseline: &Phase) -> (i64, i64) {
        (self.seconds - baseline.seconds, self.millis - baseline.millis)
    }
}

impl Timestamp {
    pub fn parse(token: &str) -> Self {
        // Truncation can leave the separator that followed the time, e.g. "...:32." or "...Z:".
        let trimmed = token.trim_end_matches([':', '.']);

        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Timestamp::Valid(dt);
        }

        let naive = NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            });

        match naive.and_then(|naive| localize(&Local, naive)) {
            Some(dt) => Timestamp::Valid(dt.fixed_offset()),
            None => Timestamp::Invalid(token.to_string()),
        }
    }

    pub fn seconds(&self) -> Option<u32> {
        match self {
            Timestamp::Valid(dt) => Some(dt.second()),
            Timestamp::Invalid(_) => None,
        }
    }

    pub fn milliseconds(&self) -> Option<u32> {
        match self {
            Timestamp::Valid(dt) => Some(dt.timestamp_subsec_millis()),
            Timestamp::Invalid(_) => None,
        }
    }

    pub fn phase(&self) -> Option<Phase> {
        Some(Phase {
            seconds: i64::from(self.seconds()?),
            millis: i64::from(self.milliseconds()?),
        })
    }

    /// Elapsed time from `earlier` to `self`; `None` if either side is invalid.
    pub fn since(&self, earlier: &Timestamp) -> Option<TimeDelta> {
        match (self, earlier) {
            (Timestamp::Valid(end), Timestamp::Valid(start)) => Some(*end - *start),
            _ => None,
        }
    }
}

/// Pins a wall-clock time to `zone`.
///
/// A time skipped by a forward clock change lands an hour later, which keeps
/// its seconds and milliseconds. Repeated times resolve to the earlier instant.
fn localize<Tz: TimeZone>(zone: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    match zone.from_local_datetime(&naive) {
        LocalResult::None => naive
            .checked_add_signed(TimeDelta::hours(1))
            .and_then(|shifted| zone.from_local_datetime(&shifted).earliest()),
        resolved => resolved.earliest(),
    }
}

/// Human readable span, e.g. `1 days 2 hours 3m 4s 5ms`.
///
/// Months are 30 days and years are 12 months. Only non-zero units are shown.
pub fn humanize(span: TimeDelta) -> String {
    let total_ms = span.num_milliseconds().unsigned_abs();
    if total_ms < 1000 {
        return format!("{}ms", total_ms);
    }

    let ms = total_ms % 1000;
    let total_secs = total_ms / 1000;
    let seconds = total_secs % 60;
    let minutes = total_secs / 60 % 60;
    let hours = total_secs / 3600 % 24;
    let total_days = total_secs / 86_400;
    let days = total_days % 30;
    let months = total_days / 30 % 12;
    let years = total_days / 360;

    let units = [
        (years, " years"),
        (months, " months"),
        (days, " days"),
        (hours, " hours"),
        (minutes, "m"),
        (seconds, "s"),
        (ms, "ms"),
    ];

    units
        .iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, suffix)| format!("{}{}", value, suffix))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Clock prefix for the status display: `M/D/YY h:mm:ss a`.
pub fn format_wall_clock(now: &DateTime<Local>) -> String {
    now.format("%-m/%-d/%y %-I:%M:%S %P").to_string()
}
