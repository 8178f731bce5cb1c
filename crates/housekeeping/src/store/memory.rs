//! Memory — in-memory audit log store.
//!
//! Backs [`AuditLogStore`] with a concurrent map keyed by `log_id`.
//! Used wherever no database is attached and as the test double for the
//! service layer. `set_unavailable` simulates a dead backend.

use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::NaiveDateTime;
use dashmap::DashMap;

use super::audit::{AuditLogRecord, AuditLogStore};
use super::error::StoreError;

#[derive(Debug, Default)]
pub struct MemoryAuditStore {
    records: DashMap<i64, AuditLogRecord>,
    unavailable: AtomicBool,
}

impl MemoryAuditStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a row, replacing any row with the same id.
    pub fn insert(&self, record: AuditLogRecord) {
        self.records.insert(record.log_id, record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Make every subsequent call fail with [`StoreError::Backend`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::Relaxed);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::Relaxed) {
            return Err(StoreError::Backend("audit store unavailable".to_string()));
        }
        Ok(())
    }
}

impl AuditLogStore for MemoryAuditStore {
    fn list(
        &self,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<AuditLogRecord>, StoreError>> + Send + '_>> {
        Box::pin(async move {
            self.check_available()?;
            let mut rows: Vec<AuditLogRecord> =
                self.records.iter().map(|r| r.value().clone()).collect();
            rows.sort_by(|a, b| b.log_date.cmp(&a.log_date).then(b.log_id.cmp(&a.log_id)));
            Ok::<_, StoreError>(rows)
        })
    }

    fn delete_by_ids<'a>(
        &'a self,
        ids: &'a [i64],
    ) -> Pin<Box<dyn std::future::Future<Output = Result<usize, StoreError>> + Send + 'a>> {
        Box::pin(async move {
            self.check_available()?;
            let removed = ids
                .iter()
                .filter(|id| self.records.remove(*id).is_some())
                .count();
            Ok::<_, StoreError>(removed)
        })
    }

    fn delete_before(
        &self,
        cutoff: NaiveDateTime,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<usize, StoreError>> + Send + '_>> {
        Box::pin(async move {
            self.check_available()?;
            // Count inside retain; len() races with concurrent inserts
            let mut removed = 0;
            self.records.retain(|_, r| {
                let keep = r.log_date >= cutoff;
                if !keep {
                    removed += 1;
                }
                keep
            });
            Ok::<_, StoreError>(removed)
        })
    }
}
