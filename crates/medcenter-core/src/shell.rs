//! Client shell
//!
//! Wires the session store into the router at boot and exposes the actions
//! the login UI and the view renderer call.

use medcenter_navigation::{Resolution, Route, Router};
use medcenter_session::SessionStore;
use medcenter_storage::{Database, KeyValueStore, MemoryStorage};

use crate::config::Config;
use crate::error::CoreError;
use crate::Result;

pub struct Shell {
    config: Config,
    session: SessionStore,
    router: Router,
}

impl Shell {
    /// Boot against the on-disk local storage at `config.database_path`.
    pub fn new(config: Config) -> Result<Self> {
        let db = Database::open(&config.database_path)?;
        Self::with_storage(config, db)
    }

    /// Boot with storage that is discarded on exit.
    pub fn in_memory(config: Config) -> Result<Self> {
        Self::with_storage(config, MemoryStorage::new())
    }

    pub fn with_storage<S>(config: Config, storage: S) -> Result<Self>
    where
        S: KeyValueStore + 'static,
    {
        let session = SessionStore::initialize(storage, config.api_base_url.clone())?;
        let router = Router::with_default_routes(session.clone());

        tracing::info!(
            environment = %config.environment,
            routes = router.table().routes().count(),
            catch_all = %router.table().fallback(),
            "Shell initialized"
        );

        Ok(Self {
            config,
            session,
            router,
        })
    }

    /// Initial navigation when the app is mounted.
    pub fn start(&self) -> Resolution {
        self.router.push("/")
    }

    // === Session actions ===

    /// Called by the login view after a successful credential exchange.
    pub fn login(&self, token: &str) -> Result<()> {
        if token.is_empty() {
            return Err(CoreError::EmptyToken);
        }

        self.session.set_token(token);
        tracing::info!("Logged in");
        Ok(())
    }

    /// Clear the session and move off the current view if it needs one.
    pub fn logout(&self) -> Option<Resolution> {
        self.session.clear_token();
        tracing::info!("Logged out");
        self.router.refresh()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn api_base_url(&self) -> String {
        self.session.get_api_base_url()
    }

    // === Navigation ===

    pub fn navigate(&self, location: &str) -> Resolution {
        self.router.push(location)
    }

    pub fn navigate_named(&self, name: &str) -> Result<Resolution> {
        Ok(self.router.push_named(name)?)
    }

    pub fn back(&self) -> Option<Resolution> {
        self.router.back()
    }

    pub fn current(&self) -> Option<Resolution> {
        self.router.current()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.router.routes()
    }

    /// Route table as handed to the view renderer
    pub fn routes_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self.router.table().records())?)
    }

    // === Accessors ===

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn router(&self) -> &Router {
        &self.router
    }
}
