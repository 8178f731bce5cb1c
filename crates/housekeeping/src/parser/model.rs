use chrono::NaiveDateTime;
use serde::Serialize;
use thiserror::Error;

/// A structured trace log entry.
///
/// Entries built from a matched line carry every header field. The
/// message keeps growing while continuation lines (stack frames and the
/// like) are appended to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceLogEntry {
    /// Serializes as ISO-8601 without offset, e.g. `2024-01-01T10:00:00`
    pub timestamp: Option<NaiveDateTime>,

    /// Severity token (INFO, WARN, ERROR, ...)
    pub level: Option<String>,

    /// Source identifier (e.g. "Umbraco.Core.PluginManager")
    pub logger: Option<String>,

    pub message: String,

    pub thread_id: Option<String>,
    pub process_id: Option<String>,
    pub domain_id: Option<String>,
}

impl TraceLogEntry {
    /// Timestamp used for ordering. Entries without one sort as the
    /// earliest possible instant.
    pub fn sort_key(&self) -> NaiveDateTime {
        self.timestamp.unwrap_or(NaiveDateTime::MIN)
    }
}

/// Per-file parsing counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    /// Physical lines consumed
    pub lines: usize,
    /// Entries started by a matched line
    pub entries: usize,
    /// Lines appended to an existing entry
    pub continuations: usize,
    /// Unmatched lines seen before the first entry
    pub dropped: usize,
    /// Lines that matched the grammar but carried an unparseable date
    pub malformed: usize,
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid timestamp '{stamp}': {source}")]
    InvalidTimestamp {
        stamp: String,
        #[source]
        source: chrono::ParseError,
    },
}
