use std::sync::Arc;

use chrono::{Local, Months, NaiveDateTime};
use tracing::{error, info};

use crate::conf::HousekeepingConfig;
use crate::store::{AuditLogRecord, AuditLogStore, StoreError, TraceLogReport, TraceLogStore};

/// Log inspection and cleanup for the admin UI.
///
/// Every failure is logged here before it is handed back, so the host can
/// map errors to responses without logging them again.
pub struct HousekeepingService {
    audit: Arc<dyn AuditLogStore>,
    traces: TraceLogStore,
    retention_months: u32,
}

impl HousekeepingService {
    pub fn new(config: &HousekeepingConfig, audit: Arc<dyn AuditLogStore>) -> Self {
        Self {
            audit,
            traces: TraceLogStore::with_config(&config.trace_log_dir, &config.trace),
            retention_months: config.audit_retention_months,
        }
    }

    pub fn trace_store(&self) -> &TraceLogStore {
        &self.traces
    }

    /// All audit log rows, newest first.
    pub async fn db_logs(&self) -> Result<Vec<AuditLogRecord>, StoreError> {
        self.audit.list().await.map_err(|e| {
            error!("Failed to list audit logs: {}", e);
            e
        })
    }

    /// Delete the given audit rows by id. Returns how many were removed.
    pub async fn delete_db_logs(&self, logs: &[AuditLogRecord]) -> Result<usize, StoreError> {
        if logs.is_empty() {
            return Ok(0);
        }

        let ids: Vec<i64> = logs.iter().map(|l| l.log_id).collect();
        let removed = self.audit.delete_by_ids(&ids).await.map_err(|e| {
            error!("Failed to delete audit logs: {}", e);
            e
        })?;

        info!(requested = ids.len(), removed, "audit logs deleted");
        Ok(removed)
    }

    /// Purge audit rows older than the configured retention.
    pub async fn delete_db_logs_before_months(&self) -> Result<usize, StoreError> {
        self.delete_db_logs_before(Local::now().naive_local()).await
    }

    /// Purge audit rows older than the configured retention, counted back from `now`.
    pub async fn delete_db_logs_before(&self, now: NaiveDateTime) -> Result<usize, StoreError> {
        let cutoff = now
            .checked_sub_months(Months::new(self.retention_months))
            .unwrap_or(NaiveDateTime::MIN);

        let removed = self.audit.delete_before(cutoff).await.map_err(|e| {
            error!("Failed to purge audit logs: {}", e);
            e
        })?;

        info!(%cutoff, removed, "audit logs purged");
        Ok(removed)
    }

    /// Parse one trace log from the configured directory.
    pub async fn trace_logs(&self, filename: &str) -> Result<TraceLogReport, StoreError> {
        self.traces.read(filename).await.map_err(|e| {
            error!("Failed to read trace log: {}", e);
            e
        })
    }
}
