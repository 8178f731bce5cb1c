//! Load — config loading from file and environment variables.

use std::path::Path;

use super::model::{HousekeepingConfig, TraceConfig};

pub const CONFIG_FILE_ENV: &str = "HOUSEKEEPING_CONFIG_FILE";
const DEFAULT_CONFIG_FILE: &str = "/etc/housekeeping/housekeeping.toml";

impl HousekeepingConfig {
    /// Load configuration from file or environment variables
    /// Priority: Environment Variables > Config File > Defaults
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = std::env::var(CONFIG_FILE_ENV)
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(Path::new(&config_path))
    }

    /// Same as [`load`](Self::load) with an explicit config file path.
    pub fn load_from(config_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = if config_path.exists() {
            tracing::info!("Loading configuration from: {}", config_path.display());
            Self::from_file(config_path)?
        } else {
            tracing::info!(
                "Config file not found at {}, using environment variables",
                config_path.display()
            );
            Self::from_env()
        };

        // Environment variables override file config for critical settings
        config.apply_overrides(|key| std::env::var(key).ok());

        Ok(config)
    }

    /// Apply the critical-setting overrides found through `lookup`.
    /// Values that fail to parse are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("HOUSEKEEPING_TRACE_LOG_DIR") {
            self.trace_log_dir = dir;
        }
        if let Some(months) = lookup("HOUSEKEEPING_AUDIT_RETENTION_MONTHS").and_then(|s| s.parse().ok()) {
            self.audit_retention_months = months;
        }
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        Ok(Self::from_toml(&contents)?)
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            trace_log_dir: std::env::var("HOUSEKEEPING_TRACE_LOG_DIR")
                .unwrap_or(defaults.trace_log_dir),
            audit_retention_months: env_parse("HOUSEKEEPING_AUDIT_RETENTION_MONTHS")
                .unwrap_or(defaults.audit_retention_months),
            trace: TraceConfig {
                continuation_separator: std::env::var("HOUSEKEEPING_CONTINUATION_SEPARATOR")
                    .unwrap_or(defaults.trace.continuation_separator),
            },
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_from_toml_full() {
        let config = HousekeepingConfig::from_toml(
            r#"
            trace_log_dir = "/srv/site/App_Data/Logs"
            audit_retention_months = 12

            [trace]
            continuation_separator = "\n"
            "#,
        )
        .unwrap();

        assert_eq!(config.trace_log_dir, "/srv/site/App_Data/Logs");
        assert_eq!(config.audit_retention_months, 12);
        assert_eq!(config.trace.continuation_separator, "\n");
    }

    #[test]
    fn test_from_toml_partial_uses_defaults() {
        let config = HousekeepingConfig::from_toml("audit_retention_months = 3").unwrap();
        assert_eq!(config.trace_log_dir, "App_Data/Logs");
        assert_eq!(config.audit_retention_months, 3);
        assert_eq!(config.trace.continuation_separator, "");
    }

    #[test]
    fn test_from_toml_rejects_bad_types() {
        assert!(HousekeepingConfig::from_toml("audit_retention_months = \"six\"").is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("housekeeping.toml");
        std::fs::write(&path, "trace_log_dir = \"logs\"\n").unwrap();

        let config = HousekeepingConfig::from_file(&path).unwrap();
        assert_eq!(config.trace_log_dir, "logs");
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let mut config = HousekeepingConfig::from_toml(
            "trace_log_dir = \"/from/file\"\naudit_retention_months = 12",
        )
        .unwrap();

        let mut env = HashMap::new();
        env.insert("HOUSEKEEPING_TRACE_LOG_DIR", "/from/env");
        env.insert("HOUSEKEEPING_AUDIT_RETENTION_MONTHS", "3");
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.trace_log_dir, "/from/env");
        assert_eq!(config.audit_retention_months, 3);
    }

    #[test]
    fn test_overrides_absent_or_invalid_keep_values() {
        let mut config = HousekeepingConfig::from_toml("audit_retention_months = 12").unwrap();

        config.apply_overrides(|_| None);
        assert_eq!(config.trace_log_dir, "App_Data/Logs");
        assert_eq!(config.audit_retention_months, 12);

        config.apply_overrides(|key| {
            (key == "HOUSEKEEPING_AUDIT_RETENTION_MONTHS").then(|| "six".to_string())
        });
        assert_eq!(config.audit_retention_months, 12);
    }

    #[test]
    fn test_from_file_missing() {
        assert!(HousekeepingConfig::from_file(Path::new("/nonexistent/housekeeping.toml")).is_err());
    }
}
