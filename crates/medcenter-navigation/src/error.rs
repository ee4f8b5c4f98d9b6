//! Navigation error types
//!
//! Only route table construction and lookups by name can fail; resolving a
//! path always ends at a route.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("Duplicate route name: {0}")]
    DuplicateName(String),

    #[error("Duplicate route path: {0}")]
    DuplicatePath(String),

    #[error("Login route not found: {0}")]
    MissingLoginRoute(String),

    #[error("Login route cannot require authentication: {0}")]
    ProtectedLoginRoute(String),

    #[error("Redirect from {from} points to unknown path {to}")]
    UnknownRedirectTarget { from: String, to: String },

    #[error("Redirect cycle through {0}")]
    RedirectCycle(String),

    #[error("Unknown route: {0}")]
    UnknownRoute(String),
}
