//! Trace log parsing
//!
//! Turns the flat text of a trace log into structured entries, folding
//! stack traces and other unstamped lines into the entry they belong to.
//!
//! # Architecture
//!
//! - `classify.rs`: decides whether a line starts a new entry and captures its fields
//! - `context.rs`: pulls thread/process/domain ids out of the captured token
//! - `builder.rs`: assembles entries and appends continuation text
//! - `trace.rs`: drives the above over the lines of one file
//! - `model.rs`: entry, statistics and error types
//!
//! The parser never touches the filesystem; see `store::trace` for that.

pub mod model;
pub mod classify;
pub mod context;
pub mod builder;
pub mod trace;

pub use model::{ParseError, ParseStats, TraceLogEntry};
pub use classify::{CapturedLine, LineClassifier, LineKind};
pub use context::{ThreadContext, ThreadContextExtractor};
pub use builder::EntryBuilder;
pub use trace::{parse_trace_log, ParseOutcome, TraceLogParser};

/// Length of the `YYYY-MM-DD HH:MM:SS` prefix every entry starts with.
pub const TIMESTAMP_LEN: usize = 19;
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
