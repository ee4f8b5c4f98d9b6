//! Medcenter Core
//!
//! Boot-time composition of the client shell: configuration, the session
//! store and the router, plus the login/logout actions the UI calls.

mod config;
mod error;
mod shell;

pub use config::{Config, Environment};
pub use error::CoreError;
pub use shell::Shell;

// Re-export core components
pub use medcenter_navigation::{
    GuardDecision, NavigationError, NavigationOutcome, Resolution, Route, RouteRecord,
    RouteTable, Router, ViewRef,
};
pub use medcenter_session::{Session, SessionError, SessionStore, TOKEN_STORAGE_KEY};
pub use medcenter_storage::{Database, KeyValueStore, MemoryStorage, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
