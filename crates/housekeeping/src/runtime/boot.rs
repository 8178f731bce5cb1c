//! Boot — logging init and config load.

use std::path::Path;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::conf::HousekeepingConfig;

/// Initialise the tracing / logging subsystem.
///
/// Logs go to stderr so command output on stdout stays machine readable.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "housekeeping=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Load and validate configuration.
///
/// `config_path` replaces the default config file location and
/// `trace_log_dir` overrides whatever directory the config names.
pub fn load_config(
    config_path: Option<&Path>,
    trace_log_dir: Option<&Path>,
) -> Result<HousekeepingConfig, Box<dyn std::error::Error>> {
    info!("Starting Housekeeping v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match config_path {
        Some(path) => HousekeepingConfig::load_from(path)?,
        None => HousekeepingConfig::load()?,
    };

    if let Some(dir) = trace_log_dir {
        config.trace_log_dir = dir.to_string_lossy().into_owned();
    }

    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    info!(
        "Loaded configuration: trace_log_dir={}, audit_retention_months={}",
        config.trace_log_dir, config.audit_retention_months
    );

    Ok(config)
}
