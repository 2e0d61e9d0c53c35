//! Entity module - `SeaORM` entity definitions for the database.
//! Content collections are stored as opaque JSON blobs, one row per key.

pub mod storage_entry;

pub use storage_entry::{
    Column as StorageEntryColumn, Entity as StorageEntry, Model as StorageEntryModel,
};
