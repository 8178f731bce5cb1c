//! Audit log interface — abstract access to the database-resident audit log.
//!
//! The service layer only talks to this trait. `memory.rs` provides the
//! in-memory implementation; a SQL-backed one plugs in the same way.

use std::pin::Pin;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::error::StoreError;

/// One audit log row joined with its user and (optional) node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLogRecord {
    pub log_id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub user_login: String,
    pub node_id: i64,
    /// `None` when the row is not attached to a node
    pub node_name: Option<String>,
    pub log_date: NaiveDateTime,
    pub log_header: String,
    pub log_comment: String,
}

/// Async interface over the audit log table.
///
/// Object-safe thanks to `Pin<Box<…>>` returns so it can live behind
/// `Arc<dyn AuditLogStore>`.
pub trait AuditLogStore: Send + Sync {
    /// All rows, newest `log_date` first.
    fn list(
        &self,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<AuditLogRecord>, StoreError>> + Send + '_>>;

    /// Delete the rows with the given ids; returns how many were removed.
    fn delete_by_ids<'a>(
        &'a self,
        ids: &'a [i64],
    ) -> Pin<Box<dyn std::future::Future<Output = Result<usize, StoreError>> + Send + 'a>>;

    /// Delete every row logged strictly before `cutoff`; returns how many were removed.
    fn delete_before(
        &self,
        cutoff: NaiveDateTime,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<usize, StoreError>> + Send + '_>>;
}
