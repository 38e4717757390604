//! Text rendering of a scan: heartbeat movements first, then errors.

use crate::detector::{self, Scan};
use crate::types::{LogLine, Severity};

pub const NO_ENTRIES: &str = "No entries yet";
pub const DEFAULT_MOVEMENT_LIMIT: usize = 10;
const RULE: &str = "----------";

/// Full report for one snapshot of the log.
pub fn build_report(lines: &[LogLine], movement_limit: usize) -> String {
    let errors = error_report(lines);
    match detector::scan(lines) {
        Some(scan) => format!("{}{}", movement_report(&scan, movement_limit), errors),
        None => format!("{}{}", NO_ENTRIES, errors),
    }
}

/// Empty when there are no `ERROR` lines.
pub fn error_report(lines: &[LogLine]) -> String {
    let errors: Vec<&LogLine> = lines
        .iter()
        .filter(|line| line.severity() == Severity::Error)
        .collect();
    if errors.is_empty() {
        return String::new();
    }

    let mut out = format!("\n{} errors\n{}", errors.len(), RULE);
    for line in errors {
        out.push_str(&format!(
            "\n{}: {} - {}",
            line.index,
            line.location().unwrap_or_default(),
            line.message.content()
        ));
    }
    out
}

/// Movement count followed by the most recent `limit` movements.
pub fn movement_report(scan: &Scan<'_>, limit: usize) -> String {
    let movements = &scan.movements;
    let shown = &movements[movements.len().saturating_sub(limit)..];

    let mut out = format!("{} counts moved\n{}", movements.len(), RULE);
    for line in shown {
        let (seconds, millis) = match scan.offset(line) {
            Some((seconds, millis)) => (seconds.to_string(), millis.to_string()),
            None => ("?".to_string(), "?".to_string()),
        };
        out.push_str(&format!(
            "\n{}: {} {}s {}",
            line.index + 1,
            line.location().unwrap_or_default(),
            seconds,
            millis
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_log;

    fn counter(index_hint: usize, ts: &str) -> String {
        format!("INFO {} loc{}: CT IN Tick", ts, index_hint)
    }

    #[test]
    fn no_entries() {
        let lines = parse_log("INFO 2018-05-20T03:24:32Z robohome: FL IN FlipperComplete\n");
        assert_eq!(build_report(&lines, DEFAULT_MOVEMENT_LIMIT), "No entries yet");
    }

    #[test]
    fn no_entries_with_errors() {
        let lines = parse_log(
            "hello\nERROR 2018-05-20T03:24:32Z db: connection lost\nworld",
        );
        assert_eq!(
            build_report(&lines, DEFAULT_MOVEMENT_LIMIT),
            "No entries yet\n1 errors\n----------\n1: db: - connection lost"
        );
    }

    #[test]
    fn error_section_lists_index_and_location() {
        let text = [
            "INFO 2018-05-20T03:24:30Z a: x",
            "INFO 2018-05-20T03:24:30Z a: x",
            "INFO 2018-05-20T03:24:30Z a: x",
            "ERROR 2018-05-20T03:24:31Z robohome: Exiting flipper thread with error",
            "INFO 2018-05-20T03:24:30Z a: x",
            "INFO 2018-05-20T03:24:30Z a: x",
            "INFO 2018-05-20T03:24:30Z a: x",
            "ERROR 2018-05-20T03:24:32Z mq: MQ IN MqError: boom",
        ]
        .join("\n");
        let lines = parse_log(&text);
        assert_eq!(
            error_report(&lines),
            "\n2 errors\n----------\
             \n3: robohome: - Exiting flipper thread with error\
             \n7: mq: - MqError: boom"
        );
    }

    #[test]
    fn no_errors_contributes_nothing() {
        let lines = parse_log("WARN 2018-05-20T03:24:32Z a: careful");
        assert_eq!(error_report(&lines), "");
    }

    #[test]
    fn movement_delta() {
        let text = [
            counter(0, "20180520T032410.500"),
            counter(1, "20180520T032510.600"),
        ]
        .join("\n");
        let lines = parse_log(&text);
        assert_eq!(
            build_report(&lines, DEFAULT_MOVEMENT_LIMIT),
            "1 counts moved\n----------\n2: loc1: 0s 100"
        );
    }

    #[test]
    fn steady_heartbeat_reports_zero() {
        let text = [
            counter(0, "2018-05-20T03:24:10Z"),
            counter(1, "2018-05-20T03:25:10Z"),
        ]
        .join("\n");
        let lines = parse_log(&text);
        assert_eq!(
            build_report(&lines, DEFAULT_MOVEMENT_LIMIT),
            "0 counts moved\n----------"
        );
    }

    #[test]
    fn shows_only_the_last_ten_movements() {
        let mut text = vec![counter(0, "20180520T030000.000")];
        for i in 1..=15 {
            text.push(counter(i, &format!("20180520T03{:02}00.{:03}", i, i)));
        }
        let lines = parse_log(&text.join("\n"));
        let report = build_report(&lines, DEFAULT_MOVEMENT_LIMIT);

        let mut expected = String::from("15 counts moved\n----------");
        for i in 6..=15 {
            expected.push_str(&format!("\n{}: loc{}: 0s {}", i + 1, i, i));
        }
        assert_eq!(report, expected);
    }

    #[test]
    fn movements_then_errors() {
        let text = [
            counter(0, "2018-05-20T03:24:10Z"),
            "ERROR 2018-05-20T03:24:11Z db: gone".to_string(),
            counter(2, "2018-05-20T03:25:08Z"),
        ]
        .join("\n");
        let lines = parse_log(&text);
        assert_eq!(
            build_report(&lines, DEFAULT_MOVEMENT_LIMIT),
            "1 counts moved\n----------\n3: loc2: -2s 0\n1 errors\n----------\n1: db: - gone"
        );
    }

    #[test]
    fn unparseable_offsets_render_as_question_marks() {
        let text = [counter(0, "2018-05-20T03:24:10Z"), counter(1, "soon")].join("\n");
        let lines = parse_log(&text);
        assert_eq!(
            build_report(&lines, DEFAULT_MOVEMENT_LIMIT),
            "1 counts moved\n----------\n2: loc1: ?s ?"
        );
    }

    #[test]
    fn custom_limit() {
        let text = [
            counter(0, "2018-05-20T03:24:10Z"),
            counter(1, "2018-05-20T03:25:11Z"),
            counter(2, "2018-05-20T03:26:12Z"),
        ]
        .join("\n");
        let lines = parse_log(&text);
        assert_eq!(build_report(&lines, 1), "2 counts moved\n----------\n3: loc2: 2s 0");
    }
}
