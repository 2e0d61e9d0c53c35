//! Durable key-value storage.
//!
//! Content stores persist each collection as one JSON string under a fixed key.
//! The backend only has to offer `get` and `set`; anything beyond that (listing,
//! deletion, transactions) is not part of the interface.

/// `SeaORM`-backed storage
pub mod database;

pub use database::DatabaseStorage;

use crate::errors::{Error, Result};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Minimal durable key-value interface used by the content stores.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`, `None` when nothing was ever written.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Writes `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Process-local storage. Cloning shares the same underlying map, so a clone
/// can be used to inspect what a store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Creates an empty in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage pre-populated with one entry.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        if let Ok(mut entries) = storage.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        storage
    }

    fn read(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().map_err(|e| Error::Storage {
            message: format!("memory storage lock poisoned: {e}"),
        })?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|e| Error::Storage {
            message: format!("memory storage lock poisoned: {e}"),
        })?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl KeyValueStore for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.read(key)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.write(key, value)
    }
}

/// Storage for environments without any durable store. Every call fails with
/// [`Error::StorageUnavailable`]; stores built on it run purely in memory.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStorage;

impl KeyValueStore for UnavailableStorage {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(Error::StorageUnavailable)
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Err(Error::StorageUnavailable)
    }
}

/// Backend chosen at start-up.
#[derive(Debug, Clone)]
pub enum Backend {
    /// `SQLite` through `SeaORM`
    Database(DatabaseStorage),
    /// In-process map
    Memory(MemoryStorage),
    /// No durable storage at all
    Unavailable(UnavailableStorage),
}

impl Backend {
    /// Short name for logging
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Database(_) => "database",
            Self::Memory(_) => "memory",
            Self::Unavailable(_) => "unavailable",
        }
    }
}

impl KeyValueStore for Backend {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match self {
            Self::Database(storage) => storage.get(key).await,
            Self::Memory(storage) => storage.get(key).await,
            Self::Unavailable(storage) => storage.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        match self {
            Self::Database(storage) => storage.set(key, value).await,
            Self::Memory(storage) => storage.set(key, value).await,
            Self::Unavailable(storage) => storage.set(key, value).await,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[tokio::test]
    async fn test_memory_storage_round_trip() -> Result<()> {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("embu_news").await?, None);

        storage.set("embu_news", "[]").await?;
        assert_eq!(storage.get("embu_news").await?.as_deref(), Some("[]"));

        storage.set("embu_news", "[1]").await?;
        assert_eq!(storage.get("embu_news").await?.as_deref(), Some("[1]"));
        Ok(())
    }

    #[tokio::test]
    async fn test_memory_storage_clones_share_entries() -> Result<()> {
        let storage = MemoryStorage::with_entry("a", "1");
        let view = storage.clone();
        storage.set("b", "2").await?;
        assert_eq!(view.get("a").await?.as_deref(), Some("1"));
        assert_eq!(view.get("b").await?.as_deref(), Some("2"));
        Ok(())
    }

    #[tokio::test]
    async fn test_unavailable_storage_always_fails() {
        let storage = UnavailableStorage;
        assert!(matches!(
            storage.get("key").await,
            Err(Error::StorageUnavailable)
        ));
        assert!(matches!(
            storage.set("key", "value").await,
            Err(Error::StorageUnavailable)
        ));
    }

    #[tokio::test]
    async fn test_backend_dispatches_to_memory() -> Result<()> {
        let memory = MemoryStorage::new();
        let backend = Backend::Memory(memory.clone());
        backend.set("k", "v").await?;
        assert_eq!(memory.get("k").await?.as_deref(), Some("v"));
        assert_eq!(backend.name(), "memory");
        Ok(())
    }
}
