//! Static route table
//!
//! Built once at startup and validated so that every path resolves to a view
//! route in a bounded number of redirect hops.

use std::collections::HashSet;
use url::Url;

use crate::error::NavigationError;
use crate::route::{Route, RouteRecord};
use crate::Result;

/// Name of the route unauthenticated navigations are sent to.
pub const LOGIN_ROUTE: &str = "login";

/// Where unmatched paths are redirected.
pub const CATCH_ALL_TARGET: &str = "/";

const BASE_URL: &str = "http://localhost/";

/// Reduce a location to the path the table matches against.
///
/// Query and fragment are dropped, dot segments are resolved, matching is
/// case-insensitive and a trailing slash is ignored. A location on another
/// origin keeps its full URL so it never matches a route and falls through to
/// the catch-all.
pub fn normalize_path(location: &str) -> String {
    let location = location.trim();
    if location.is_empty() {
        return "/".to_string();
    }

    let path = Url::parse(BASE_URL)
        .and_then(|base| {
            let url = base.join(location)?;
            Ok(if url.origin() == base.origin() {
                url.path().to_string()
            } else {
                url.to_string()
            })
        })
        .unwrap_or_else(|_| location.to_string());

    let path = path.to_lowercase();
    let trimmed = path.trim_end_matches('/');

    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    records: Vec<RouteRecord>,
    /// Catch-all redirect target for unmatched paths
    fallback: String,
    login: Route,
}

impl RouteTable {
    /// Validate and build a table.
    pub fn new(records: Vec<RouteRecord>, fallback: &str, login_name: &str) -> Result<Self> {
        let records: Vec<RouteRecord> = records.into_iter().map(normalize_record).collect();
        let fallback = normalize_path(fallback);

        let mut names = HashSet::new();
        let mut paths = HashSet::new();
        for record in &records {
            if !paths.insert(record.path().to_string()) {
                return Err(NavigationError::DuplicatePath(record.path().to_string()));
            }
            if let RouteRecord::View(route) = record {
                if !names.insert(route.name.clone()) {
                    return Err(NavigationError::DuplicateName(route.name.clone()));
                }
            }
        }

        let login = records
            .iter()
            .find_map(|record| match record {
                RouteRecord::View(route) if route.name == login_name => Some(route.clone()),
                _ => None,
            })
            .ok_or_else(|| NavigationError::MissingLoginRoute(login_name.to_string()))?;

        if login.requires_auth {
            return Err(NavigationError::ProtectedLoginRoute(login.name));
        }

        let table = Self {
            records,
            fallback,
            login,
        };
        table.validate_redirects()?;

        Ok(table)
    }

    /// Every redirect, and the catch-all, must land on a view route without
    /// revisiting a path.
    fn validate_redirects(&self) -> Result<()> {
        let starts = self
            .records
            .iter()
            .filter_map(|record| match record {
                RouteRecord::Redirect { path, .. } => Some(path.as_str()),
                RouteRecord::View(_) => None,
            })
            .chain(std::iter::once("<catch-all>"));

        for start in starts {
            let mut seen = HashSet::new();
            let mut from = start.to_string();
            let mut current = if start == "<catch-all>" {
                self.fallback.clone()
            } else {
                start.to_string()
            };

            loop {
                if !seen.insert(current.clone()) {
                    return Err(NavigationError::RedirectCycle(current));
                }

                match self.find_by_path(&current) {
                    Some(RouteRecord::View(_)) => break,
                    Some(RouteRecord::Redirect { to, .. }) => {
                        from = current;
                        current = to.clone();
                    }
                    None => {
                        return Err(NavigationError::UnknownRedirectTarget {
                            from,
                            to: current,
                        })
                    }
                }
            }
        }

        Ok(())
    }

    /// Exact match on an already normalized path
    pub fn find_by_path(&self, path: &str) -> Option<&RouteRecord> {
        self.records.iter().find(|record| record.path() == path)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Route> {
        self.routes().find(|route| route.name == name)
    }

    pub fn login(&self) -> &Route {
        &self.login
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// View routes in declaration order
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.records.iter().filter_map(|record| match record {
            RouteRecord::View(route) => Some(route),
            RouteRecord::Redirect { .. } => None,
        })
    }

    pub fn records(&self) -> &[RouteRecord] {
        &self.records
    }

    /// Follow redirects from `location` until a view route is reached.
    ///
    /// Returns the route and the path the first redirect was taken from.
    pub fn follow(&self, location: &str) -> (Route, Option<String>) {
        let requested = normalize_path(location);
        let mut current = requested.clone();
        let mut redirected = false;

        // Validation bounds the chain; the limit only protects against misuse.
        for _ in 0..=self.records.len() + 1 {
            match self.find_by_path(&current) {
                Some(RouteRecord::View(route)) => {
                    let redirected_from = redirected.then(|| requested.clone());
                    return (route.clone(), redirected_from);
                }
                Some(RouteRecord::Redirect { to, .. }) => {
                    current = to.clone();
                }
                None => {
                    current = self.fallback.clone();
                }
            }
            redirected = true;
        }

        tracing::error!(path = %requested, "Redirect chain did not terminate, sending to login");
        (self.login.clone(), Some(requested))
    }
}

impl Default for RouteTable {
    /// The medical-center route table
    fn default() -> Self {
        Self {
            records: default_records(),
            fallback: CATCH_ALL_TARGET.to_string(),
            login: Route::public("/login", LOGIN_ROUTE, "modules/auth/Login"),
        }
    }
}

fn default_records() -> Vec<RouteRecord> {
    vec![
        RouteRecord::redirect("/", "/home"),
        Route::public("/login", LOGIN_ROUTE, "modules/auth/Login").into(),
        Route::protected("/home", "home", "shared/components/Home").into(),
        Route::protected(
            "/centros-medicos",
            "centros_medicos",
            "modules/centros-medicos/CentrosMedicos",
        )
        .into(),
        Route::protected("/empleados", "empleados", "modules/empleados/Empleados").into(),
        Route::protected(
            "/especialidades",
            "especialidades",
            "modules/especialidades/Especialidades",
        )
        .into(),
        Route::protected("/medicos", "medicos", "modules/medicos/Medicos").into(),
        Route::protected("/usuarios", "usuarios", "modules/usuarios/Usuarios").into(),
    ]
}

fn normalize_record(record: RouteRecord) -> RouteRecord {
    match record {
        RouteRecord::View(mut route) => {
            route.path = normalize_path(&route.path);
            RouteRecord::View(route)
        }
        RouteRecord::Redirect { path, to } => RouteRecord::Redirect {
            path: normalize_path(&path),
            to: normalize_path(&to),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("/medicos/"), "/medicos");
        assert_eq!(normalize_path("/Medicos"), "/medicos");
        assert_eq!(normalize_path("medicos"), "/medicos");
        assert_eq!(normalize_path("/medicos?page=2#top"), "/medicos");
        assert_eq!(normalize_path("/home/../usuarios"), "/usuarios");
    }

    #[test]
    fn test_foreign_origin_falls_through() {
        let table = RouteTable::default();

        for location in [
            "//evil.com/medicos",
            "http://x/medicos",
            "https://localhost/medicos",
            "http://localhost:9000/medicos",
        ] {
            let path = normalize_path(location);
            assert_ne!(path, "/medicos", "{}", location);
            assert!(table.find_by_path(&path).is_none(), "{}", location);

            let (route, redirected_from) = table.follow(location);
            assert_eq!(route.name, "home", "{}", location);
            assert!(redirected_from.is_some(), "{}", location);
        }

        assert_eq!(normalize_path("http://localhost/medicos"), "/medicos");
    }

    #[test]
    fn test_default_table_is_valid() {
        let table = RouteTable::new(default_records(), CATCH_ALL_TARGET, LOGIN_ROUTE).unwrap();
        assert_eq!(table.routes().count(), RouteTable::default().routes().count());
        assert_eq!(table.login(), RouteTable::default().login());
    }

    #[test]
    fn test_only_login_is_public() {
        let table = RouteTable::default();
        for route in table.routes() {
            assert_eq!(route.requires_auth, route.name != LOGIN_ROUTE, "{}", route.name);
        }
    }

    #[test]
    fn test_follow_root_and_unmatched() {
        let table = RouteTable::default();

        let (route, redirected_from) = table.follow("/");
        assert_eq!(route.name, "home");
        assert_eq!(redirected_from.as_deref(), Some("/"));

        let (route, redirected_from) = table.follow("/does-not-exist");
        assert_eq!(route.name, "home");
        assert_eq!(redirected_from.as_deref(), Some("/does-not-exist"));

        let (route, redirected_from) = table.follow("/medicos");
        assert_eq!(route.name, "medicos");
        assert!(redirected_from.is_none());
    }

    #[test]
    fn test_rejects_duplicates() {
        let records = vec![
            Route::public("/login", "login", "Login").into(),
            Route::public("/other", "login", "Other").into(),
        ];
        assert!(matches!(
            RouteTable::new(records, "/login", LOGIN_ROUTE),
            Err(NavigationError::DuplicateName(_))
        ));

        let records = vec![
            Route::public("/login", "login", "Login").into(),
            RouteRecord::redirect("/LOGIN/", "/login"),
        ];
        assert!(matches!(
            RouteTable::new(records, "/login", LOGIN_ROUTE),
            Err(NavigationError::DuplicatePath(_))
        ));
    }

    #[test]
    fn test_login_route_rules() {
        let records = vec![Route::public("/home", "home", "Home").into()];
        assert!(matches!(
            RouteTable::new(records, "/home", LOGIN_ROUTE),
            Err(NavigationError::MissingLoginRoute(_))
        ));

        let records = vec![Route::protected("/login", "login", "Login").into()];
        assert!(matches!(
            RouteTable::new(records, "/login", LOGIN_ROUTE),
            Err(NavigationError::ProtectedLoginRoute(_))
        ));
    }

    #[test]
    fn test_rejects_bad_redirects() {
        let records = vec![
            Route::public("/login", "login", "Login").into(),
            RouteRecord::redirect("/", "/missing"),
        ];
        assert!(matches!(
            RouteTable::new(records, "/login", LOGIN_ROUTE),
            Err(NavigationError::UnknownRedirectTarget { .. })
        ));

        let records = vec![
            Route::public("/login", "login", "Login").into(),
            RouteRecord::redirect("/a", "/b"),
            RouteRecord::redirect("/b", "/a"),
        ];
        assert!(matches!(
            RouteTable::new(records, "/login", LOGIN_ROUTE),
            Err(NavigationError::RedirectCycle(_))
        ));

        let records = vec![Route::public("/login", "login", "Login").into()];
        assert!(matches!(
            RouteTable::new(records, "/nowhere", LOGIN_ROUTE),
            Err(NavigationError::UnknownRedirectTarget { .. })
        ));
    }
}
