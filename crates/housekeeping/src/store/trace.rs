//! Trace log files — resolve a file name under the configured directory,
//! read it line by line and run it through the parser.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::conf::TraceConfig;
use crate::parser::{EntryBuilder, ParseStats, TraceLogEntry, TraceLogParser};
use super::error::StoreError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parsed view of one trace log file.
///
/// When reading fails part way through, `entries` holds everything parsed
/// up to that point and `failure` says what went wrong.
#[derive(Debug, Clone, Serialize)]
pub struct TraceLogReport {
    pub filename: String,
    /// Newest first
    pub entries: Vec<TraceLogEntry>,
    pub stats: ParseStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl TraceLogReport {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

/// Access to the trace logs under one base directory.
#[derive(Debug, Clone)]
pub struct TraceLogStore {
    base_dir: PathBuf,
    continuation_separator: String,
}

impl TraceLogStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self::with_config(base_dir, &TraceConfig::default())
    }

    pub fn with_config(base_dir: impl Into<PathBuf>, trace: &TraceConfig) -> Self {
        Self {
            base_dir: base_dir.into(),
            continuation_separator: trace.continuation_separator.clone(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Join `filename` onto the base directory.
    ///
    /// Only plain relative names are accepted; anything that could leave the
    /// base directory (`..`, absolute paths, drive prefixes) is rejected.
    pub fn resolve(&self, filename: &str) -> Result<PathBuf, StoreError> {
        let relative = Path::new(filename);
        let plain = !filename.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));

        if !plain {
            return Err(StoreError::InvalidFileName(filename.to_string()));
        }

        Ok(self.base_dir.join(relative))
    }

    /// Read and parse one trace log.
    ///
    /// A missing file is an error. Any failure after the file has been
    /// found is reported inside the returned report instead.
    pub async fn read(&self, filename: &str) -> Result<TraceLogReport, StoreError> {
        let path = self.resolve(filename)?;
        let not_found = || StoreError::FileNotFound {
            filename: filename.to_string(),
            path: path.clone(),
        };

        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Err(not_found()),
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(not_found()),
            Err(e) => {
                warn!(filename, error = %e, "trace log: cannot inspect file");
                return Ok(self.failed_before_read(filename, e));
            }
        }

        let file = match File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(not_found()),
            Err(e) => {
                warn!(filename, error = %e, "trace log: cannot open file");
                return Ok(self.failed_before_read(filename, e));
            }
        };

        Ok(self.parse_reader(filename, BufReader::new(file)).await)
    }

    /// Parse trace log text from any buffered reader.
    ///
    /// Lines may end in `\n` or `\r\n`; invalid UTF-8 is replaced rather
    /// than rejected. A read error stops the parse and is recorded in the
    /// report alongside the entries gathered so far.
    pub async fn parse_reader<R>(&self, filename: &str, reader: R) -> TraceLogReport
    where
        R: AsyncBufRead + Unpin,
    {
        let mut parser =
            TraceLogParser::with_builder(EntryBuilder::new(self.continuation_separator.clone()));

        let failure = match feed_lines(reader, &mut parser).await {
            Ok(()) => None,
            Err(e) => {
                warn!(
                    filename,
                    lines_read = parser.stats().lines,
                    error = %e,
                    "trace log: read failed, returning partial result"
                );
                Some(e.to_string())
            }
        };

        let outcome = parser.finish();
        info!(
            filename,
            entries = outcome.entries.len(),
            lines = outcome.stats.lines,
            malformed = outcome.stats.malformed,
            "trace log parsed"
        );

        TraceLogReport {
            filename: filename.to_string(),
            entries: outcome.entries,
            stats: outcome.stats,
            failure,
        }
    }

    fn failed_before_read(&self, filename: &str, error: std::io::Error) -> TraceLogReport {
        TraceLogReport {
            filename: filename.to_string(),
            entries: Vec::new(),
            stats: ParseStats::default(),
            failure: Some(error.to_string()),
        }
    }
}

async fn feed_lines<R>(mut reader: R, parser: &mut TraceLogParser) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let mut first = true;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            return Ok(());
        }

        let mut line = strip_line_ending(&buf);
        if first {
            line = line.strip_prefix(UTF8_BOM).unwrap_or(line);
            first = false;
        }

        parser.push_line(&String::from_utf8_lossy(line));
    }
}

fn strip_line_ending(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}
