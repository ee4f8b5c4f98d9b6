//! Navigation guard

use serde::{Deserialize, Serialize};

use medcenter_session::SessionStore;

use crate::route::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardDecision {
    Proceed,
    RedirectToLogin,
}

impl GuardDecision {
    /// Pure decision from the route flag and token presence.
    pub fn evaluate(requires_auth: bool, authenticated: bool) -> Self {
        if requires_auth && !authenticated {
            GuardDecision::RedirectToLogin
        } else {
            GuardDecision::Proceed
        }
    }
}

/// Run the guard for `target` against the current session state.
pub fn guard(target: &Route, session: &SessionStore) -> GuardDecision {
    GuardDecision::evaluate(target.requires_auth, session.is_authenticated())
}
