//! Session error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Storage error: {0}")]
    Storage(#[from] medcenter_storage::StorageError),

    #[error("API base URL cannot be empty")]
    EmptyApiBaseUrl,
}
