use chrono::NaiveDateTime;

use super::classify::CapturedLine;
use super::context::ThreadContextExtractor;
use super::model::{ParseError, TraceLogEntry};
use super::{TIMESTAMP_FORMAT, TIMESTAMP_LEN};

/// Assembles entries from classified lines.
#[derive(Debug, Clone, Default)]
pub struct EntryBuilder {
    extractor: ThreadContextExtractor,
    /// Inserted before every appended continuation line
    separator: String,
}

impl EntryBuilder {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            extractor: ThreadContextExtractor,
            separator: separator.into(),
        }
    }

    /// Build a finished entry from a matched line.
    ///
    /// Fails only when the date stamp has the right shape but names an
    /// impossible instant (month 13, hour 99, ...).
    pub fn build(&self, captured: &CapturedLine<'_>) -> Result<TraceLogEntry, ParseError> {
        let timestamp = parse_timestamp(captured.stamp)?;
        let ctx = self.extractor.extract(captured.process.unwrap_or_default());

        Ok(TraceLogEntry {
            timestamp: Some(timestamp),
            level: Some(captured.level.to_string()),
            logger: Some(captured.logger.to_string()),
            message: captured.message.to_string(),
            thread_id: ctx.thread_id,
            process_id: ctx.process_id,
            domain_id: ctx.domain_id,
        })
    }

    /// Append the raw text of an unmatched line to `entry`'s message.
    pub fn append(&self, entry: &mut TraceLogEntry, line: &str) {
        entry.message.reserve(self.separator.len() + line.len());
        entry.message.push_str(&self.separator);
        entry.message.push_str(line);
    }
}

fn parse_timestamp(stamp: &str) -> Result<NaiveDateTime, ParseError> {
    let stamp = stamp.get(..TIMESTAMP_LEN).unwrap_or(stamp);
    NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).map_err(|source| {
        ParseError::InvalidTimestamp {
            stamp: stamp.to_string(),
            source,
        }
    })
}
