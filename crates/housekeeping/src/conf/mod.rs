//! Conf module — configuration model and loading.

pub mod model;
pub mod load;

pub use model::{HousekeepingConfig, TraceConfig};
pub use load::CONFIG_FILE_ENV;
