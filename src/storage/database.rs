//! `SeaORM`-backed key-value storage.

use super::KeyValueStore;
use crate::{
    entities::{StorageEntry, storage_entry},
    errors::Result,
};
use chrono::Utc;
use sea_orm::{Set, prelude::*};

/// Durable storage in the `storage_entries` table.
#[derive(Debug, Clone)]
pub struct DatabaseStorage {
    db: DatabaseConnection,
}

impl DatabaseStorage {
    /// Wraps an open connection. The table must already exist
    /// (see [`crate::config::database::create_tables`]).
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl KeyValueStore for DatabaseStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entry = StorageEntry::find()
            .filter(storage_entry::Column::Key.eq(key))
            .one(&self.db)
            .await?;

        Ok(entry.map(|e| e.value))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let now = Utc::now().naive_utc();

        let existing = StorageEntry::find()
            .filter(storage_entry::Column::Key.eq(key))
            .one(&self.db)
            .await?;

        if let Some(entry) = existing {
            let mut active_model: storage_entry::ActiveModel = entry.into();
            active_model.value = Set(value.to_string());
            active_model.updated_at = Set(now);
            active_model.update(&self.db).await?;
        } else {
            let new_entry = storage_entry::ActiveModel {
                key: Set(key.to_string()),
                value: Set(value.to_string()),
                updated_at: Set(now),
                ..Default::default()
            };
            new_entry.insert(&self.db).await?;
        }

        Ok(())
    }
}
