//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] medcenter_storage::StorageError),

    #[error("Session error: {0}")]
    Session(#[from] medcenter_session::SessionError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] medcenter_navigation::NavigationError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Login returned an empty token")]
    EmptyToken,
}
