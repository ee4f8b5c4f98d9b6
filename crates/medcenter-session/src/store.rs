//! Session Store
//!
//! Single source of truth for "is this client authenticated". The store is a
//! cheaply cloneable handle; pass it to whoever needs to read or mutate the
//! session instead of reaching for a global.

use parking_lot::RwLock;
use std::sync::Arc;

use medcenter_storage::KeyValueStore;

use crate::error::SessionError;
use crate::session::Session;
use crate::Result;

/// Local storage key holding the raw token.
pub const TOKEN_STORAGE_KEY: &str = "token";

pub struct SessionStore {
    /// In-memory token, authoritative for the running process
    token: Arc<RwLock<String>>,
    /// Fixed at construction, never mutated
    api_base_url: Arc<str>,
    /// Durable mirror of the token
    storage: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    /// Build the store, restoring the persisted token if there is one.
    ///
    /// A missing entry or an unreadable storage both start the session logged
    /// out.
    pub fn initialize<S>(storage: S, api_base_url: impl Into<String>) -> Result<Self>
    where
        S: KeyValueStore + 'static,
    {
        let api_base_url = api_base_url.into();
        if api_base_url.trim().is_empty() {
            return Err(SessionError::EmptyApiBaseUrl);
        }

        let token = match storage.get_item(TOKEN_STORAGE_KEY) {
            Ok(token) => token.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read persisted token, starting logged out");
                String::new()
            }
        };

        tracing::info!(
            authenticated = !token.is_empty(),
            api_base_url = %api_base_url,
            "Initialized session store"
        );

        Ok(Self {
            token: Arc::new(RwLock::new(token)),
            api_base_url: Arc::from(api_base_url),
            storage: Arc::new(storage),
        })
    }

    pub fn get_token(&self) -> String {
        self.token.read().clone()
    }

    /// Login-success path. An empty value behaves like [`clear_token`].
    ///
    /// [`clear_token`]: SessionStore::clear_token
    pub fn set_token(&self, value: impl Into<String>) {
        let value = value.into();

        // Held across the storage call so memory and storage change together.
        let mut token = self.token.write();
        *token = value;

        if let Err(e) = self.persist(&token) {
            tracing::warn!(error = %e, "Failed to persist token, keeping in-memory session");
        }
    }

    /// Logout path. Removes the persisted entry; safe to call repeatedly.
    pub fn clear_token(&self) {
        self.set_token(String::new());
    }

    pub fn get_api_base_url(&self) -> String {
        self.api_base_url.to_string()
    }

    pub fn is_authenticated(&self) -> bool {
        !self.token.read().is_empty()
    }

    pub fn snapshot(&self) -> Session {
        Session::new(self.get_token(), self.get_api_base_url())
    }

    /// Mirror the token into storage: write when present, delete when empty.
    fn persist(&self, token: &str) -> Result<()> {
        if token.is_empty() {
            self.storage.remove_item(TOKEN_STORAGE_KEY)?;
            tracing::debug!("Removed persisted token");
        } else {
            self.storage.set_item(TOKEN_STORAGE_KEY, token)?;
            tracing::debug!("Persisted token");
        }
        Ok(())
    }
}

impl Clone for SessionStore {
    fn clone(&self) -> Self {
        Self {
            token: Arc::clone(&self.token),
            api_base_url: Arc::clone(&self.api_base_url),
            storage: Arc::clone(&self.storage),
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the token itself
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medcenter_storage::{Database, MemoryStorage, StorageError};

    const API: &str = "http://localhost:8080/api";

    struct UnavailableStorage;

    impl KeyValueStore for UnavailableStorage {
        fn get_item(&self, _key: &str) -> medcenter_storage::Result<Option<String>> {
            Err(StorageError::Unavailable("permission denied".to_string()))
        }

        fn set_item(&self, _key: &str, _value: &str) -> medcenter_storage::Result<()> {
            Err(StorageError::Unavailable("quota exceeded".to_string()))
        }

        fn remove_item(&self, _key: &str) -> medcenter_storage::Result<()> {
            Err(StorageError::Unavailable("permission denied".to_string()))
        }
    }

    #[test]
    fn test_starts_logged_out_without_persisted_token() {
        let store = SessionStore::initialize(MemoryStorage::new(), API).unwrap();
        assert_eq!(store.get_token(), "");
        assert!(!store.is_authenticated());
        assert_eq!(store.get_api_base_url(), API);
    }

    #[test]
    fn test_rejects_empty_api_base_url() {
        let result = SessionStore::initialize(MemoryStorage::new(), "  ");
        assert!(matches!(result, Err(SessionError::EmptyApiBaseUrl)));
    }

    #[test]
    fn test_set_token_persists() {
        let storage = MemoryStorage::new();
        let store = SessionStore::initialize(storage.clone(), API).unwrap();

        store.set_token("abc");
        assert_eq!(store.get_token(), "abc");
        assert!(store.is_authenticated());
        assert_eq!(
            storage.get_item(TOKEN_STORAGE_KEY).unwrap().as_deref(),
            Some("abc")
        );
    }

    #[test]
    fn test_clear_token_is_idempotent() {
        let storage = MemoryStorage::new();
        let store = SessionStore::initialize(storage.clone(), API).unwrap();
        store.set_token("abc");

        store.clear_token();
        store.clear_token();

        assert_eq!(store.get_token(), "");
        assert_eq!(storage.get_item(TOKEN_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_setting_empty_token_removes_entry() {
        let storage = MemoryStorage::new();
        let store = SessionStore::initialize(storage.clone(), API).unwrap();
        store.set_token("abc");

        store.set_token("");
        assert!(storage.is_empty());
    }

    #[test]
    fn test_token_survives_restart() {
        let db = Database::open_in_memory().unwrap();

        let store = SessionStore::initialize(db.clone(), API).unwrap();
        store.set_token("abc");
        drop(store);

        let restarted = SessionStore::initialize(db.clone(), API).unwrap();
        assert_eq!(restarted.get_token(), "abc");

        restarted.clear_token();
        let restarted_again = SessionStore::initialize(db, API).unwrap();
        assert_eq!(restarted_again.get_token(), "");
    }

    #[test]
    fn test_storage_failure_does_not_break_mutators() {
        let store = SessionStore::initialize(UnavailableStorage, API).unwrap();
        assert_eq!(store.get_token(), "");

        store.set_token("abc");
        assert_eq!(store.get_token(), "abc");

        store.clear_token();
        assert_eq!(store.get_token(), "");
    }

    #[test]
    fn test_clones_share_state() {
        let store = SessionStore::initialize(MemoryStorage::new(), API).unwrap();
        let handle = store.clone();

        handle.set_token("tok1");
        assert_eq!(store.get_token(), "tok1");
        assert_eq!(
            store.snapshot(),
            Session::new("tok1".to_string(), API.to_string())
        );
    }

    #[test]
    fn test_debug_hides_token() {
        let store = SessionStore::initialize(MemoryStorage::new(), API).unwrap();
        store.set_token("secret-token");
        assert!(!format!("{:?}", store).contains("secret-token"));
    }
}
