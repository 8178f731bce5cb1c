use tracing::{debug, trace};

use super::builder::EntryBuilder;
use super::classify::{LineClassifier, LineKind};
use super::model::{ParseStats, TraceLogEntry};

enum ParserState {
    /// Unmatched lines are discarded
    NoEntryYet,
    /// Unmatched lines attach to `entries[latest]`, the most recently
    /// built entry in file order (not the newest by timestamp)
    HasEntries { latest: usize },
}

/// Result of parsing one trace log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    /// Newest first
    pub entries: Vec<TraceLogEntry>,
    pub stats: ParseStats,
}

/// Turns the lines of one trace log into entries.
///
/// Feed lines in file order with [`push_line`](Self::push_line) and call
/// [`finish`](Self::finish) once. Each parser owns its result, so parsers
/// can run concurrently without coordination.
pub struct TraceLogParser {
    classifier: LineClassifier,
    builder: EntryBuilder,
    state: ParserState,
    entries: Vec<TraceLogEntry>,
    stats: ParseStats,
}

impl TraceLogParser {
    pub fn new() -> Self {
        Self::with_builder(EntryBuilder::default())
    }

    pub fn with_builder(builder: EntryBuilder) -> Self {
        Self {
            classifier: LineClassifier,
            builder,
            state: ParserState::NoEntryYet,
            entries: Vec::new(),
            stats: ParseStats::default(),
        }
    }

    pub fn push_line(&mut self, line: &str) {
        self.stats.lines += 1;

        if let LineKind::Entry(captured) = self.classifier.classify(line) {
            match self.builder.build(&captured) {
                Ok(entry) => {
                    self.entries.push(entry);
                    self.stats.entries += 1;
                    self.state = ParserState::HasEntries {
                        latest: self.entries.len() - 1,
                    };
                    return;
                }
                Err(e) => {
                    // Treated as an ordinary unmatched line below
                    debug!(line_no = self.stats.lines, error = %e, "trace log: malformed entry line");
                    self.stats.malformed += 1;
                }
            }
        }

        match self.state {
            ParserState::HasEntries { latest } => {
                if let Some(entry) = self.entries.get_mut(latest) {
                    self.builder.append(entry, line);
                    self.stats.continuations += 1;
                }
            }
            ParserState::NoEntryYet => {
                trace!(line_no = self.stats.lines, "trace log: dropping line before first entry");
                self.stats.dropped += 1;
            }
        }
    }

    pub fn stats(&self) -> ParseStats {
        self.stats
    }

    /// Order the accumulated entries newest first and hand them over.
    ///
    /// The sort is stable, so entries sharing a timestamp keep file order.
    pub fn finish(self) -> ParseOutcome {
        let mut entries = self.entries;
        entries.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));

        ParseOutcome {
            entries,
            stats: self.stats,
        }
    }
}

impl Default for TraceLogParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an already-read trace log, newest entry first.
pub fn parse_trace_log<I, S>(lines: I) -> Vec<TraceLogEntry>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = TraceLogParser::new();
    for line in lines {
        parser.push_line(line.as_ref());
    }
    parser.finish().entries
}
