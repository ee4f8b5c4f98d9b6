//! Medcenter Session Store
//!
//! - A session is a single auth token plus the API base URL
//! - Empty token means unauthenticated, anything else means authenticated
//! - Every token mutation is mirrored to local storage (write or delete)
//! - Persistence is best-effort; the in-memory token is authoritative

mod error;
mod session;
mod store;

pub use error::SessionError;
pub use session::Session;
pub use store::{SessionStore, TOKEN_STORAGE_KEY};

pub type Result<T> = std::result::Result<T, SessionError>;
