//! Sync job error types.

use groupix_backend::BackendError;
use groupix_core::ConfigError;
use thiserror::Error;

/// Errors that abort a job run.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{operation} failed: {source}")]
    Backend {
        operation: &'static str,
        #[source]
        source: BackendError,
    },
}

impl SyncError {
    pub(crate) fn backend(operation: &'static str) -> impl FnOnce(BackendError) -> Self {
        move |source| Self::Backend { operation, source }
    }
}

/// Result type for job runs.
pub type SyncResult<T> = std::result::Result<T, SyncError>;
