//! Medcenter Navigation
//!
//! Static route table plus the guard that runs before every navigation:
//! 1. Redirect records (`/` and the catch-all) are followed first
//! 2. A protected route with no session token resolves to `login`
//! 3. Everything else proceeds to the requested route

mod error;
mod guard;
mod route;
mod router;
mod table;

pub use error::NavigationError;
pub use guard::{guard, GuardDecision};
pub use route::{Route, RouteRecord, ViewRef};
pub use router::{NavigationOutcome, Resolution, Router, MAX_HISTORY};
pub use table::{normalize_path, RouteTable, CATCH_ALL_TARGET, LOGIN_ROUTE};

pub type Result<T> = std::result::Result<T, NavigationError>;
