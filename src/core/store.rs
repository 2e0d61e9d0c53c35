//! Default-preserving content store.
//!
//! One [`ContentStore`] owns the live collection for one entity kind. Built-in
//! defaults are re-asserted on every start and can never be changed or removed
//! through the store; custom entries are freely mutable. Every mutation is
//! persisted as a JSON blob and then broadcast to subscribers.
//!
//! Storage problems never reach the caller. A failed read counts as "nothing
//! persisted", a failed write is logged and the in-memory collection is updated
//! anyway, so in-process consumers keep working without durable storage.

use crate::{
    core::subject::{Subject, Subscription},
    errors::Error,
    storage::KeyValueStore,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Serialize, de::DeserializeOwned};
use std::fmt::Debug;
use std::sync::Arc;
use thiserror::Error as ThisError;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// Where `add` places a new custom entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    /// Newest first
    Front,
    /// Newest last
    Back,
}

/// An entity kind managed by a [`ContentStore`].
pub trait ContentEntity:
    Clone + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Singular name used in log lines
    const KIND: &'static str;
    /// Storage key suffix (the configured prefix goes in front)
    const STORAGE_KEY: &'static str;
    /// Ids of the built-in entries. Permanent.
    const DEFAULT_IDS: &'static [&'static str];
    /// Where new custom entries go
    const INSERT_POSITION: InsertPosition;

    /// Stable identifier
    fn id(&self) -> &str;

    /// Whether this is a built-in entry
    fn is_default(&self) -> bool;

    /// Sets the built-in flag
    fn set_default(&mut self, is_default: bool);

    /// Freshly built default collection, every entry flagged as default
    fn defaults() -> Vec<Self>;

    /// Case-insensitive admin search; `term` is already lowercased
    fn matches_search(&self, term: &str) -> bool;

    /// Whether `id` belongs to the fixed default set
    fn is_default_id(id: &str) -> bool {
        Self::DEFAULT_IDS.contains(&id)
    }
}

/// Why a mutation was refused.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Rejection {
    /// Tried to create an entry with a reserved default id
    #[error("'{id}' is reserved for a built-in entry")]
    DefaultId {
        /// Offending id
        id: String,
    },
    /// Tried to change or remove a built-in entry
    #[error("'{id}' is a built-in entry and cannot be changed")]
    ProtectedEntity {
        /// Offending id
        id: String,
    },
    /// Tried to create an entry whose id is already taken
    #[error("an entry with id '{id}' already exists")]
    DuplicateId {
        /// Offending id
        id: String,
    },
    /// No entry has this id
    #[error("no entry with id '{id}'")]
    NotFound {
        /// Missing id
        id: String,
    },
}

/// Result of a store mutation. Rejections are not errors; the store state is
/// simply left untouched.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The collection changed, was persisted and broadcast
    Applied,
    /// Nothing changed
    Rejected(Rejection),
}

impl MutationOutcome {
    /// Whether the mutation took effect
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Live collection of one entity kind, synchronized with durable storage.
pub struct ContentStore<E: ContentEntity, S: KeyValueStore> {
    storage: S,
    key: String,
    subject: Subject<E>,
    writer: Mutex<()>,
}

impl<E: ContentEntity, S: KeyValueStore> ContentStore<E, S> {
    /// Builds the store: loads, merges and persists the initial collection.
    pub async fn open(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let initial = Self::initialize(&storage, &key).await;
        info!("{} store initialized with {} entries", E::KIND, initial.len());

        Self {
            storage,
            key,
            subject: Subject::new(initial),
            writer: Mutex::new(()),
        }
    }

    /// Produces the start-up collection.
    ///
    /// Defaults always come first and always win: persisted entries flagged as
    /// default, or carrying a default id, are discarded and the remaining custom
    /// entries are appended in their persisted order. The result is written back.
    pub async fn initialize(storage: &S, key: &str) -> Vec<E> {
        let defaults = E::defaults();
        let stored: Vec<E> = load(storage, key).await;

        if stored.is_empty() {
            debug!("No stored {} entries, using defaults", E::KIND);
            save(storage, key, &defaults).await;
            return defaults;
        }

        let customs = stored
            .into_iter()
            .filter(|entry| !entry.is_default() && !E::is_default_id(entry.id()));
        let merged: Vec<E> = defaults.into_iter().chain(customs).collect();

        debug!("Merged {} entries: {}", E::KIND, merged.len());
        save(storage, key, &merged).await;
        merged
    }

    /// Storage key this store writes to
    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Latest snapshot of the collection
    #[must_use]
    pub fn current(&self) -> Arc<Vec<E>> {
        self.subject.value()
    }

    /// Registers an observer, called now and after every mutation.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&[E]) + Send + Sync + 'static,
    {
        self.subject.subscribe(observer)
    }

    /// Looks up one entry
    #[must_use]
    pub fn by_id(&self, id: &str) -> Option<E> {
        self.current().iter().find(|entry| entry.id() == id).cloned()
    }

    /// Entries matching `predicate`, in collection order
    #[must_use]
    pub fn filter<P>(&self, predicate: P) -> Vec<E>
    where
        P: Fn(&E) -> bool,
    {
        self.current()
            .iter()
            .filter(|entry| predicate(entry))
            .cloned()
            .collect()
    }

    /// Case-insensitive search over the kind's searchable fields. A blank term
    /// matches everything.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<E> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return self.current().to_vec();
        }
        self.filter(|entry| entry.matches_search(&term))
    }

    /// Number of custom (non-default) entries
    #[must_use]
    pub fn custom_count(&self) -> usize {
        self.current().iter().filter(|e| !e.is_default()).count()
    }

    /// Adds a custom entry.
    pub async fn add(&self, mut entity: E) -> MutationOutcome {
        let _guard = self.writer.lock().await;
        let id = entity.id().to_string();

        if E::is_default_id(&id) {
            return self.reject(Rejection::DefaultId { id });
        }
        if self.by_id(&id).is_some() {
            return self.reject(Rejection::DuplicateId { id });
        }

        entity.set_default(false);
        let mut entries = self.current().to_vec();
        match E::INSERT_POSITION {
            InsertPosition::Front => entries.insert(0, entity),
            InsertPosition::Back => entries.push(entity),
        }

        info!("Added {} '{id}'", E::KIND);
        self.commit(entries).await;
        MutationOutcome::Applied
    }

    /// Replaces the custom entry `id` with `entity`.
    pub async fn update(&self, id: &str, mut entity: E) -> MutationOutcome {
        let _guard = self.writer.lock().await;

        let Some(existing) = self.by_id(id) else {
            return self.reject(Rejection::NotFound { id: id.to_string() });
        };
        if existing.is_default() {
            return self.reject(Rejection::ProtectedEntity { id: id.to_string() });
        }

        let new_id = entity.id().to_string();
        if new_id != id {
            if E::is_default_id(&new_id) {
                return self.reject(Rejection::DefaultId { id: new_id });
            }
            if self.by_id(&new_id).is_some() {
                return self.reject(Rejection::DuplicateId { id: new_id });
            }
        }

        entity.set_default(false);
        let entries = self
            .current()
            .iter()
            .map(|entry| {
                if entry.id() == id {
                    entity.clone()
                } else {
                    entry.clone()
                }
            })
            .collect();

        info!("Updated {} '{id}'", E::KIND);
        self.commit(entries).await;
        MutationOutcome::Applied
    }

    /// Removes the custom entry `id`.
    pub async fn delete(&self, id: &str) -> MutationOutcome {
        let _guard = self.writer.lock().await;

        let Some(existing) = self.by_id(id) else {
            return self.reject(Rejection::NotFound { id: id.to_string() });
        };
        if existing.is_default() {
            return self.reject(Rejection::ProtectedEntity { id: id.to_string() });
        }

        let entries = self
            .current()
            .iter()
            .filter(|entry| entry.id() != id)
            .cloned()
            .collect();

        info!("Deleted {} '{id}'", E::KIND);
        self.commit(entries).await;
        MutationOutcome::Applied
    }

    /// Drops every custom entry.
    pub async fn reset_to_defaults(&self) {
        let _guard = self.writer.lock().await;
        self.commit(E::defaults()).await;
        info!("{} entries reset to defaults", E::KIND);
    }

    /// Applies `change` to the entry `id`, default or not. Used for bookkeeping
    /// fields (such as counters) that are not part of the protected content.
    pub(crate) async fn modify<F>(&self, id: &str, change: F) -> MutationOutcome
    where
        F: FnOnce(&mut E),
    {
        let _guard = self.writer.lock().await;

        let mut entries = self.current().to_vec();
        let Some(entry) = entries.iter_mut().find(|entry| entry.id() == id) else {
            return self.reject(Rejection::NotFound { id: id.to_string() });
        };
        change(entry);

        self.commit(entries).await;
        MutationOutcome::Applied
    }

    fn reject(&self, rejection: Rejection) -> MutationOutcome {
        warn!("Rejected {} mutation on {}: {rejection}", E::KIND, self.key);
        MutationOutcome::Rejected(rejection)
    }

    async fn commit(&self, entries: Vec<E>) {
        save(&self.storage, &self.key, &entries).await;
        self.subject.publish(entries);
    }
}

async fn load<E: ContentEntity, S: KeyValueStore>(storage: &S, key: &str) -> Vec<E> {
    let raw = match storage.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(Error::StorageUnavailable) => {
            debug!("Storage unavailable, no persisted {} entries", E::KIND);
            return Vec::new();
        }
        Err(e) => {
            error!("Error loading {} entries from storage: {e}", E::KIND);
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<E>>(&raw) {
        Ok(entries) => {
            debug!("Loaded {} {} entries from storage", entries.len(), E::KIND);
            entries
        }
        Err(e) => {
            error!("Discarding malformed persisted {} data: {e}", E::KIND);
            Vec::new()
        }
    }
}

async fn save<E: ContentEntity, S: KeyValueStore>(storage: &S, key: &str, entries: &[E]) {
    let raw = match serde_json::to_string(entries) {
        Ok(raw) => raw,
        Err(e) => {
            error!("Error serializing {} entries: {e}", E::KIND);
            return;
        }
    };

    match storage.set(key, &raw).await {
        Ok(()) => debug!("Saved {} {} entries to storage", entries.len(), E::KIND),
        Err(Error::StorageUnavailable) => {
            debug!("Storage unavailable, keeping {} entries in memory", E::KIND);
        }
        Err(e) => error!("Error saving {} entries to storage: {e}", E::KIND),
    }
}

/// Parses a `YYYY-MM-DD` date, also accepting a full RFC 3339 timestamp.
#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(value)
            .ok()
            .map(|dt| dt.date_naive())
    })
}

/// Sorts newest first by the date `key` extracts; undated entries go last and
/// keep their relative order. A `limit` of zero means no limit.
pub fn sort_by_date_desc<E, F>(mut entries: Vec<E>, key: F, limit: Option<usize>) -> Vec<E>
where
    F: Fn(&E) -> Option<NaiveDate>,
{
    entries.sort_by(|a, b| key(b).cmp(&key(a)));
    if let Some(limit) = limit.filter(|&n| n > 0) {
        entries.truncate(limit);
    }
    entries
}

/// Id for a new custom entry: `<prefix>-<unix millis>`.
#[must_use]
pub fn timestamped_id(prefix: &str) -> String {
    timestamped_id_at(prefix, Utc::now())
}

fn timestamped_id_at(prefix: &str, at: DateTime<Utc>) -> String {
    format!("{prefix}-{}", at.timestamp_millis())
}

/// Id derived from a display name: lowercased, every character outside
/// `[a-z0-9]` replaced with `-`, cut to 20 characters, then `-<unix millis>`.
#[must_use]
pub fn slug_id(name: &str) -> String {
    slug_id_at(name, Utc::now())
}

fn slug_id_at(name: &str, at: DateTime<Utc>) -> String {
    let slug: String = name
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                '-'
            }
        })
        .take(20)
        .collect();
    timestamped_id_at(&slug, at)
}
