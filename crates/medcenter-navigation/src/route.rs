//! Route records

use serde::{Deserialize, Serialize};

/// Lazily resolvable view reference.
///
/// The renderer loads the component behind this path on demand; the router
/// only carries it along.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewRef(String);

impl ViewRef {
    pub fn new(component: impl Into<String>) -> Self {
        Self(component.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ViewRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub path: String,
    pub name: String,
    pub requires_auth: bool,
    pub view: ViewRef,
}

impl Route {
    /// A route anyone can open
    pub fn public(path: &str, name: &str, view: &str) -> Self {
        Self {
            path: path.to_string(),
            name: name.to_string(),
            requires_auth: false,
            view: ViewRef::new(view),
        }
    }

    /// A route that needs a session token
    pub fn protected(path: &str, name: &str, view: &str) -> Self {
        Self {
            requires_auth: true,
            ..Self::public(path, name, view)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RouteRecord {
    /// Renders a view
    View(Route),
    /// Sends the navigation on to another path
    Redirect { path: String, to: String },
}

impl RouteRecord {
    pub fn redirect(path: &str, to: &str) -> Self {
        RouteRecord::Redirect {
            path: path.to_string(),
            to: to.to_string(),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            RouteRecord::View(route) => &route.path,
            RouteRecord::Redirect { path, .. } => path,
        }
    }
}

impl From<Route> for RouteRecord {
    fn from(route: Route) -> Self {
        RouteRecord::View(route)
    }
}
