//! The five content stores of the portal, opened together over one backend.

use crate::config::StorageConfig;
use crate::core::departments::Department;
use crate::core::downloads::Download;
use crate::core::news::NewsArticle;
use crate::core::services::CountyService;
use crate::core::store::{ContentEntity, ContentStore, MutationOutcome};
use crate::core::tenders::Tender;
use crate::storage::KeyValueStore;
use std::fmt;
use tracing::info;

/// Content kinds managed by the portal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// County departments
    Departments,
    /// News articles
    News,
    /// Procurement tenders
    Tenders,
    /// Downloadable documents
    Downloads,
    /// Citizen services
    Services,
}

impl ContentKind {
    /// Every kind, in menu order
    pub const ALL: [Self; 5] = [
        Self::Departments,
        Self::News,
        Self::Tenders,
        Self::Downloads,
        Self::Services,
    ];

    /// Human-readable plural label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Departments => "Departments",
            Self::News => "News",
            Self::Tenders => "Tenders",
            Self::Downloads => "Downloads",
            Self::Services => "Services",
        }
    }

    /// Parses a label or storage key, ignoring case and surrounding spaces
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|kind| {
            kind.label().eq_ignore_ascii_case(name) || kind.storage_key().eq_ignore_ascii_case(name)
        })
    }

    /// Storage key suffix for this kind
    #[must_use]
    pub const fn storage_key(self) -> &'static str {
        match self {
            Self::Departments => Department::STORAGE_KEY,
            Self::News => NewsArticle::STORAGE_KEY,
            Self::Tenders => Tender::STORAGE_KEY,
            Self::Downloads => Download::STORAGE_KEY,
            Self::Services => CountyService::STORAGE_KEY,
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Entry counts for one kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindSummary {
    /// Which kind
    pub kind: ContentKind,
    /// All entries
    pub total: usize,
    /// Entries added at runtime
    pub custom: usize,
}

/// All content stores, sharing one storage backend
pub struct ContentStores<S: KeyValueStore> {
    /// Department store
    pub departments: ContentStore<Department, S>,
    /// News store
    pub news: ContentStore<NewsArticle, S>,
    /// Tender store
    pub tenders: ContentStore<Tender, S>,
    /// Download store
    pub downloads: ContentStore<Download, S>,
    /// Service store
    pub services: ContentStore<CountyService, S>,
}

impl<S: KeyValueStore + Clone> ContentStores<S> {
    /// Opens every store, each under its prefixed key.
    pub async fn open(storage: S, config: &StorageConfig) -> Self {
        let stores = Self {
            departments: ContentStore::open(
                storage.clone(),
                config.key_for(Department::STORAGE_KEY),
            )
            .await,
            news: ContentStore::open(storage.clone(), config.key_for(NewsArticle::STORAGE_KEY))
                .await,
            tenders: ContentStore::open(storage.clone(), config.key_for(Tender::STORAGE_KEY))
                .await,
            downloads: ContentStore::open(storage.clone(), config.key_for(Download::STORAGE_KEY))
                .await,
            services: ContentStore::open(storage, config.key_for(CountyService::STORAGE_KEY))
                .await,
        };
        info!("Content stores ready");
        stores
    }
}

impl<S: KeyValueStore> ContentStores<S> {
    /// Deletes the custom entry `id` from the store of `kind`.
    pub async fn delete(&self, kind: ContentKind, id: &str) -> MutationOutcome {
        match kind {
            ContentKind::Departments => self.departments.delete(id).await,
            ContentKind::News => self.news.delete(id).await,
            ContentKind::Tenders => self.tenders.delete(id).await,
            ContentKind::Downloads => self.downloads.delete(id).await,
            ContentKind::Services => self.services.delete(id).await,
        }
    }

    /// Drops every custom entry of `kind`.
    pub async fn reset(&self, kind: ContentKind) {
        match kind {
            ContentKind::Departments => self.departments.reset_to_defaults().await,
            ContentKind::News => self.news.reset_to_defaults().await,
            ContentKind::Tenders => self.tenders.reset_to_defaults().await,
            ContentKind::Downloads => self.downloads.reset_to_defaults().await,
            ContentKind::Services => self.services.reset_to_defaults().await,
        }
    }

    /// Whether `id` is a built-in id of `kind`
    #[must_use]
    pub fn is_default_id(kind: ContentKind, id: &str) -> bool {
        match kind {
            ContentKind::Departments => Department::is_default_id(id),
            ContentKind::News => NewsArticle::is_default_id(id),
            ContentKind::Tenders => Tender::is_default_id(id),
            ContentKind::Downloads => Download::is_default_id(id),
            ContentKind::Services => CountyService::is_default_id(id),
        }
    }

    /// Ids of the custom entries of `kind`, in collection order
    #[must_use]
    pub fn custom_ids(&self, kind: ContentKind) -> Vec<String> {
        fn customs<E: ContentEntity, S: KeyValueStore>(store: &ContentStore<E, S>) -> Vec<String> {
            store
                .current()
                .iter()
                .filter(|entry| !entry.is_default())
                .map(|entry| entry.id().to_string())
                .collect()
        }

        match kind {
            ContentKind::Departments => customs(&self.departments),
            ContentKind::News => customs(&self.news),
            ContentKind::Tenders => customs(&self.tenders),
            ContentKind::Downloads => customs(&self.downloads),
            ContentKind::Services => customs(&self.services),
        }
    }

    /// Entry counts for every kind
    #[must_use]
    pub fn summary(&self) -> Vec<KindSummary> {
        ContentKind::ALL
            .into_iter()
            .map(|kind| {
                let (total, custom) = match kind {
                    ContentKind::Departments => {
                        (self.departments.current().len(), self.departments.custom_count())
                    }
                    ContentKind::News => (self.news.current().len(), self.news.custom_count()),
                    ContentKind::Tenders => {
                        (self.tenders.current().len(), self.tenders.custom_count())
                    }
                    ContentKind::Downloads => {
                        (self.downloads.current().len(), self.downloads.custom_count())
                    }
                    ContentKind::Services => {
                        (self.services.current().len(), self.services.custom_count())
                    }
                };
                KindSummary {
                    kind,
                    total,
                    custom,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::store::Rejection;
    use crate::storage::MemoryStorage;
    use crate::test_utils::{init_test_tracing, memory_stores, sample_service, sample_tender};

    #[tokio::test]
    async fn test_open_uses_prefixed_keys() {
        init_test_tracing();
        let storage = MemoryStorage::new();
        let config = StorageConfig {
            key_prefix: "test_".to_string(),
        };
        let stores = ContentStores::open(storage.clone(), &config).await;

        assert_eq!(stores.tenders.storage_key(), "test_tenders");
        for kind in ContentKind::ALL {
            let key = config.key_for(kind.storage_key());
            assert!(storage.get(&key).await.unwrap().is_some(), "{key} not persisted");
        }
    }

    #[tokio::test]
    async fn test_summary_counts_defaults() {
        let (_, stores) = memory_stores().await;
        let summary = stores.summary();
        let totals: Vec<usize> = summary.iter().map(|s| s.total).collect();
        assert_eq!(totals, vec![10, 6, 6, 10, 10]);
        assert!(summary.iter().all(|s| s.custom == 0));
    }

    #[tokio::test]
    async fn test_delete_and_reset_by_kind() {
        let (_, stores) = memory_stores().await;
        assert!(stores.tenders.add(sample_tender("tender-a")).await.is_applied());
        assert!(stores.services.add(sample_service("service-a")).await.is_applied());
        assert!(stores.services.add(sample_service("service-b")).await.is_applied());
        assert_eq!(stores.custom_ids(ContentKind::Services), vec!["service-b", "service-a"]);

        assert!(stores.delete(ContentKind::Tenders, "tender-a").await.is_applied());
        assert!(matches!(
            stores.delete(ContentKind::Tenders, "tender-road-embu-2024").await,
            MutationOutcome::Rejected(Rejection::ProtectedEntity { .. })
        ));

        stores.reset(ContentKind::Services).await;
        assert!(stores.custom_ids(ContentKind::Services).is_empty());
    }

    #[test]
    fn test_kind_from_name() {
        assert_eq!(ContentKind::from_name(" tenders "), Some(ContentKind::Tenders));
        assert_eq!(ContentKind::from_name("NEWS"), Some(ContentKind::News));
        assert_eq!(ContentKind::from_name("payroll"), None);
    }

    #[test]
    fn test_default_id_lookup() {
        assert!(ContentStores::<MemoryStorage>::is_default_id(
            ContentKind::Departments,
            "finance"
        ));
        assert!(!ContentStores::<MemoryStorage>::is_default_id(
            ContentKind::News,
            "finance"
        ));
    }
}
