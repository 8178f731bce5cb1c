use std::sync::LazyLock;

use regex::Regex;

/// Grammar of a line that opens a new entry.
///
/// `STAMP` is the 19-character date prefix (the `,mmm` part is matched but
/// not kept). The thread/process token can sit in either of two slots:
/// bracketed before the level (`PROCESS1`) or right after the ` - `
/// separator (`PROCESS2`, modern `T5/D1/P2` style or legacy `Thread 7`).
const ENTRY_PATTERN: &str = concat!(
    r"(?s)^(?P<STAMP>\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}),\d{3}",
    r"(?:\s\[(?P<PROCESS1>[^\]]+)\])?",
    r"\s+(?P<LEVEL>\w+) {1,5}(?P<LOGGER>.+?) -",
    r"(?:\s\[(?P<PROCESS2>[A-Z]\d{1,6}/[A-Z]\d{1,6}/[A-Z]\d{1,6}|Thread \d+)\]\s|\s)",
    r"(?P<MESSAGE>.+)",
);

static ENTRY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ENTRY_PATTERN).expect("Invalid trace entry pattern"));

/// Fields captured from a line that starts a new entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapturedLine<'a> {
    pub stamp: &'a str,
    /// `PROCESS2` when present, otherwise `PROCESS1`
    pub process: Option<&'a str>,
    pub level: &'a str,
    pub logger: &'a str,
    pub message: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// The line opens a new entry
    Entry(CapturedLine<'a>),
    /// Stack frame, wrapped message text or garbage
    Continuation,
}

/// Classifies single trace log lines.
///
/// Stateless; the compiled grammar is shared process-wide.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineClassifier;

impl LineClassifier {
    pub fn classify<'a>(&self, line: &'a str) -> LineKind<'a> {
        let Some(caps) = ENTRY_REGEX.captures(line) else {
            return LineKind::Continuation;
        };

        let field = |name: &str| caps.name(name).map(|m| m.as_str()).unwrap_or_default();

        let process = caps
            .name("PROCESS2")
            .or_else(|| caps.name("PROCESS1"))
            .map(|m| m.as_str());

        LineKind::Entry(CapturedLine {
            stamp: field("STAMP"),
            process,
            level: field("LEVEL"),
            logger: field("LOGGER"),
            message: field("MESSAGE"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn captured(line: &str) -> CapturedLine<'_> {
        match LineClassifier.classify(line) {
            LineKind::Entry(c) => c,
            LineKind::Continuation => panic!("expected an entry line: {line:?}"),
        }
    }

    #[test]
    fn test_modern_bracket_before_level() {
        let c = captured("2024-01-01 10:00:00,000 [T5/D1/P2] INFO  MyLogger - hello");
        assert_eq!(c.stamp, "2024-01-01 10:00:00");
        assert_eq!(c.process, Some("T5/D1/P2"));
        assert_eq!(c.level, "INFO");
        assert_eq!(c.logger, "MyLogger");
        assert_eq!(c.message, "hello");
    }

    #[test]
    fn test_legacy_thread_after_logger() {
        let c = captured("2024-01-01 10:00:00,000 INFO  MyLogger - [Thread 7] hello");
        assert_eq!(c.process, Some("Thread 7"));
        assert_eq!(c.level, "INFO");
        assert_eq!(c.logger, "MyLogger");
        assert_eq!(c.message, "hello");
    }

    #[test]
    fn test_process_after_logger() {
        let c = captured("2015-06-12 08:01:02,345 WARN  Umbraco.Core.Sync - [P4412/T12/D2] Slow response");
        assert_eq!(c.process, Some("P4412/T12/D2"));
        assert_eq!(c.level, "WARN");
        assert_eq!(c.logger, "Umbraco.Core.Sync");
        assert_eq!(c.message, "Slow response");
    }

    #[test]
    fn test_second_slot_wins_over_first() {
        let c = captured("2024-01-01 10:00:00,000 [main] ERROR App - [Thread 3] boom");
        assert_eq!(c.process, Some("Thread 3"));
    }

    #[test]
    fn test_no_process_token() {
        let c = captured("2024-01-01 10:00:00,000 DEBUG Some.Logger - plain message");
        assert_eq!(c.process, None);
        assert_eq!(c.level, "DEBUG");
        assert_eq!(c.logger, "Some.Logger");
        assert_eq!(c.message, "plain message");
    }

    #[test]
    fn test_logger_stops_at_first_separator() {
        let c = captured("2024-01-01 10:00:00,000 INFO  A.B - x - y");
        assert_eq!(c.logger, "A.B");
        assert_eq!(c.message, "x - y");
    }

    #[test]
    fn test_unrecognized_bracket_stays_in_message() {
        let c = captured("2024-01-01 10:00:00,000 INFO  A.B - [user] logged in");
        assert_eq!(c.process, None);
        assert_eq!(c.message, "[user] logged in");
    }

    #[test]
    fn test_continuation_lines() {
        let lines = [
            "   at Foo.Bar()",
            "at Baz.Qux()",
            "",
            "System.NullReferenceException: Object reference not set",
            "2024-01-01 10:00:00 INFO  MyLogger - missing millis",
            "2024-01-01 10:00:00,000 INFO  MyLogger -",
            "  2024-01-01 10:00:00,000 INFO  MyLogger - indented",
        ];
        for line in lines {
            assert_eq!(LineClassifier.classify(line), LineKind::Continuation, "{line:?}");
        }
    }

    #[test]
    fn test_impossible_date_still_matches_shape() {
        // Rejected later when the timestamp is parsed
        let c = captured("2024-13-45 99:00:00,000 INFO  MyLogger - hello");
        assert_eq!(c.stamp, "2024-13-45 99:00:00");
    }
}
