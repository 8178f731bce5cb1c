//! Store module — the collaborators behind the admin operations.
//!
//! `trace.rs` resolves and reads trace log files and feeds them to the parser.
//! `audit.rs` is the abstract interface over the audit log database;
//! `memory.rs` provides an in-memory implementation of it.

pub mod error;
pub mod trace;
pub mod audit;
pub mod memory;

pub use error::StoreError;
pub use trace::{TraceLogReport, TraceLogStore};
pub use audit::{AuditLogRecord, AuditLogStore};
pub use memory::MemoryAuditStore;
