//! In-process storage, lost on drop

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::{KeyValueStore, Result};

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items.write().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::new();
        assert!(storage.is_empty());

        storage.set_item("token", "abc").unwrap();
        assert_eq!(storage.len(), 1);
        assert_eq!(storage.get_item("token").unwrap().as_deref(), Some("abc"));

        storage.remove_item("token").unwrap();
        storage.remove_item("token").unwrap();
        assert!(storage.is_empty());
    }
}
