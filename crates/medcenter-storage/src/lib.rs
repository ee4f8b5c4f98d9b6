//! Medcenter Storage Layer
//!
//! Client-local durable key/value storage. The shell keeps exactly one
//! entry here (the auth token), but the store itself is key-agnostic.

mod database;
mod error;
mod memory;
mod migrations;

pub use database::Database;
pub use error::StorageError;
pub use memory::MemoryStorage;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Local key/value storage with `localStorage`-like semantics.
///
/// An absent key reads as `None`; removing an absent key succeeds.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    fn remove_item(&self, key: &str) -> Result<()>;
}
