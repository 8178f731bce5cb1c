use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("The requested trace log file '{filename}' could not be found")]
    FileNotFound { filename: String, path: PathBuf },

    #[error("Invalid trace log file name: '{0}'")]
    InvalidFileName(String),

    #[error("Audit log backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// True for the errors a caller should present as "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::FileNotFound { .. })
    }
}
