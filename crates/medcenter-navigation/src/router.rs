//! Router
//!
//! Resolves locations against the route table, runs the guard, and keeps the
//! location history the renderer navigates through.

use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;

use medcenter_session::SessionStore;

use crate::error::NavigationError;
use crate::guard::{guard, GuardDecision};
use crate::route::Route;
use crate::table::{normalize_path, RouteTable};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum NavigationOutcome {
    /// Navigation goes to the requested route
    Proceed(Route),
    /// Requested route is protected and there is no session
    RedirectToLogin { blocked: Route, login: Route },
}

/// Terminal destination of one navigation attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    /// Normalized requested path
    pub requested: String,
    /// Set when a redirect record (root or catch-all) was followed
    pub redirected_from: Option<String>,
    pub outcome: NavigationOutcome,
}

impl Resolution {
    /// The route that will be rendered
    pub fn route(&self) -> &Route {
        match &self.outcome {
            NavigationOutcome::Proceed(route) => route,
            NavigationOutcome::RedirectToLogin { login, .. } => login,
        }
    }

    pub fn name(&self) -> &str {
        &self.route().name
    }

    pub fn is_redirect_to_login(&self) -> bool {
        matches!(self.outcome, NavigationOutcome::RedirectToLogin { .. })
    }
}

/// Oldest entries are dropped past this many locations.
pub const MAX_HISTORY: usize = 50;

pub struct Router {
    table: Arc<RouteTable>,
    session: SessionStore,
    /// Visited locations, most recent last
    history: Arc<RwLock<Vec<Resolution>>>,
}

impl Router {
    pub fn new(table: RouteTable, session: SessionStore) -> Self {
        Self {
            table: Arc::new(table),
            session,
            history: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn with_default_routes(session: SessionStore) -> Self {
        Self::new(RouteTable::default(), session)
    }

    /// Resolve a location without recording it.
    pub fn resolve(&self, location: &str) -> Resolution {
        let requested = normalize_path(location);
        let (target, redirected_from) = self.table.follow(&requested);
        self.apply_guard(requested, redirected_from, target)
    }

    /// Resolve a route by name without recording it.
    pub fn resolve_named(&self, name: &str) -> Result<Resolution> {
        let target = self
            .table
            .find_by_name(name)
            .cloned()
            .ok_or_else(|| NavigationError::UnknownRoute(name.to_string()))?;

        Ok(self.apply_guard(target.path.clone(), None, target))
    }

    fn apply_guard(
        &self,
        requested: String,
        redirected_from: Option<String>,
        target: Route,
    ) -> Resolution {
        let outcome = match guard(&target, &self.session) {
            GuardDecision::Proceed => NavigationOutcome::Proceed(target),
            GuardDecision::RedirectToLogin => {
                tracing::debug!(route = %target.name, "No session, redirecting to login");
                NavigationOutcome::RedirectToLogin {
                    blocked: target,
                    login: self.table.login().clone(),
                }
            }
        };

        Resolution {
            requested,
            redirected_from,
            outcome,
        }
    }

    /// Navigate to a location and record where it ended up.
    pub fn push(&self, location: &str) -> Resolution {
        let resolution = self.resolve(location);
        self.record(resolution.clone());
        resolution
    }

    pub fn push_named(&self, name: &str) -> Result<Resolution> {
        let resolution = self.resolve_named(name)?;
        self.record(resolution.clone());
        Ok(resolution)
    }

    fn record(&self, resolution: Resolution) {
        tracing::info!(
            path = %resolution.requested,
            route = %resolution.name(),
            redirected = resolution.is_redirect_to_login(),
            "Navigated"
        );

        let mut history = self.history.write();
        // Landing on the current route again replaces it instead of stacking
        if history
            .last()
            .is_some_and(|last| last.route() == resolution.route())
        {
            history.pop();
        }
        history.push(resolution);

        if history.len() > MAX_HISTORY {
            let excess = history.len() - MAX_HISTORY;
            history.drain(..excess);
        }
    }

    pub fn current(&self) -> Option<Resolution> {
        self.history.read().last().cloned()
    }

    /// Go to the previous location, re-running the guard on it.
    ///
    /// Returns `None` when there is nothing to go back to.
    pub fn back(&self) -> Option<Resolution> {
        let mut history = self.history.write();
        if history.len() < 2 {
            return None;
        }

        history.pop();
        let previous = history.pop()?;
        let resolution = self.resolve(&previous.route().path);
        history.push(resolution.clone());

        tracing::info!(route = %resolution.name(), "Navigated back");

        Some(resolution)
    }

    /// Re-run the guard on the current location, e.g. after logout.
    pub fn refresh(&self) -> Option<Resolution> {
        let mut history = self.history.write();
        let current = history.pop()?;
        let resolution = self.resolve(&current.route().path);

        if resolution.route() != current.route() {
            tracing::info!(
                from = %current.name(),
                to = %resolution.name(),
                "Current location no longer allowed"
            );
        }

        history.push(resolution.clone());
        Some(resolution)
    }

    pub fn history_len(&self) -> usize {
        self.history.read().len()
    }

    /// Route table for the view renderer
    pub fn routes(&self) -> Vec<Route> {
        self.table.routes().cloned().collect()
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }
}

impl Clone for Router {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
            session: self.session.clone(),
            history: Arc::clone(&self.history),
        }
    }
}
