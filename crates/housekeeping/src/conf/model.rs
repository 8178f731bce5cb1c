//! Model — HousekeepingConfig and related structs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HousekeepingConfig {
    /// Base directory trace log file names are resolved against
    pub trace_log_dir: String,
    /// Audit rows older than this many months are purged
    pub audit_retention_months: u32,
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Text placed between an entry's message and each continuation line.
    /// Empty means plain concatenation.
    pub continuation_separator: String,
}

impl Default for HousekeepingConfig {
    fn default() -> Self {
        Self {
            trace_log_dir: "App_Data/Logs".to_string(),
            audit_retention_months: 6,
            trace: TraceConfig::default(),
        }
    }
}

impl HousekeepingConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.trace_log_dir.trim().is_empty() {
            return Err("trace_log_dir must not be empty".to_string());
        }
        if self.audit_retention_months == 0 {
            return Err("audit_retention_months must be > 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HousekeepingConfig::default();
        assert_eq!(config.trace_log_dir, "App_Data/Logs");
        assert_eq!(config.audit_retention_months, 6);
        assert_eq!(config.trace.continuation_separator, "");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_trace_log_dir() {
        let config = HousekeepingConfig {
            trace_log_dir: "  ".to_string(),
            ..HousekeepingConfig::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("trace_log_dir"));
    }

    #[test]
    fn test_validate_zero_retention() {
        let config = HousekeepingConfig {
            audit_retention_months: 0,
            ..HousekeepingConfig::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("audit_retention_months"));
    }
}
