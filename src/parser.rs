//! Turns raw log text into typed [`LogLine`]s.
//!
//! Parsing is total: malformed input falls back to `Unknown` severity and
//! simple messages instead of erroring.

use crate::timestamp::{Timestamp, MAX_TIMESTAMP_CHARS};
use crate::types::{LineHeader, Level, LogLine, Message, MessageDirection, MessageSubject};

/// Split a whole file into lines. Every `\n`-separated segment is kept, blank or not.
pub fn parse_log(text: &str) -> Vec<LogLine> {
    text.split('\n')
        .enumerate()
        .map(|(index, line)| classify_line(line, index))
        .collect()
}

/// Classify one line: `<LEVEL> <TIMESTAMP> <LOCATION> <payload...>`.
pub fn classify_line(text: &str, index: usize) -> LogLine {
    let mut parts: Vec<&str> = text.split(' ').collect();
    if parts.first() == Some(&"") {
        parts.remove(0);
    }

    let level = parts.first().and_then(|token| Level::from_token(token));
    let Some(level) = level else {
        return LogLine {
            original: text.to_string(),
            index,
            header: None,
            message: classify_message(&parts),
        };
    };

    let raw_timestamp: String = parts
        .get(1)
        .map(|token| token.chars().take(MAX_TIMESTAMP_CHARS).collect())
        .unwrap_or_default();
    let location = parts.get(2).map(|token| token.to_string()).unwrap_or_default();
    let payload = parts.get(3..).unwrap_or(&[]);

    LogLine {
        original: text.to_string(),
        index,
        header: Some(LineHeader {
            level,
            timestamp: Timestamp::parse(&raw_timestamp),
            location,
        }),
        message: classify_message(payload),
    }
}

/// Classify a payload as `<SUBJECT> <DIRECTION> <content...>` or plain text.
pub fn classify_message(parts: &[&str]) -> Message {
    if parts.len() < 2 {
        return Message::Simple(parts.first().map(|part| part.to_string()).unwrap_or_default());
    }

    let subject = MessageSubject::from_code(parts[0]);
    let direction = MessageDirection::from_code(parts[1]);
    match (subject, direction) {
        (Some(subject), Some(direction)) => Message::Structured {
            subject,
            direction,
            content: parts[2..].join(" "),
        },
        _ => Message::Simple(parts.join(" ")),
    }
}
