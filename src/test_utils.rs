//! Shared test utilities for the county portal.
//!
//! This module provides helpers for setting up test databases, test logging and
//! custom (non-default) content entries with sensible defaults.

use crate::{
    config::StorageConfig,
    core::{
        departments::{Department, RevenueStream},
        downloads::Download,
        news::NewsArticle,
        services::{CountyService, ServiceFee},
        stores::ContentStores,
        tenders::{Tender, TenderStatus},
    },
    errors::Result,
    storage::MemoryStorage,
};
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all database tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Routes `tracing` output to the test harness. Safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Opens all stores over a fresh in-memory storage.
/// Returns the storage too, so tests can inspect what was persisted.
pub async fn memory_stores() -> (MemoryStorage, ContentStores<MemoryStorage>) {
    init_test_tracing();
    let storage = MemoryStorage::new();
    let stores = ContentStores::open(storage.clone(), &StorageConfig::default()).await;
    (storage, stores)
}

/// Custom department with one revenue stream.
///
/// # Defaults
/// * `total_revenue`: 1,000,000
/// * `is_default`: false
#[must_use]
pub fn sample_department(id: &str) -> Department {
    Department {
        id: id.to_string(),
        name: format!("Test Department {id}"),
        short_name: None,
        icon: "🏛️".to_string(),
        description: "Department created by a test".to_string(),
        revenue_streams: vec![RevenueStream {
            name: "Test Fees".to_string(),
            description: None,
        }],
        total_revenue: Some(1_000_000.0),
        is_default: false,
    }
}

/// Custom news article published on 2024-01-01, not featured.
#[must_use]
pub fn sample_news(id: &str) -> NewsArticle {
    NewsArticle {
        id: id.to_string(),
        title: format!("Test article {id}"),
        content: "Body of the test article".to_string(),
        summary: "Test summary".to_string(),
        category: "Testing".to_string(),
        author: "Test Desk".to_string(),
        publish_date: "2024-01-01".to_string(),
        image_url: None,
        featured: false,
        tags: vec!["test".to_string()],
        is_default: false,
    }
}

/// Custom open tender worth KES 1,000,000.
#[must_use]
pub fn sample_tender(id: &str) -> Tender {
    Tender {
        id: id.to_string(),
        title: format!("Test tender {id}"),
        description: "Supply of test equipment".to_string(),
        category: "Testing".to_string(),
        opening_date: "2024-01-01".to_string(),
        closing_date: "2024-02-01".to_string(),
        status: TenderStatus::Open,
        value: Some(1_000_000.0),
        document_url: None,
        is_default: false,
    }
}

/// Custom download that was never downloaded.
#[must_use]
pub fn sample_download(id: &str) -> Download {
    Download {
        id: id.to_string(),
        title: format!("Test document {id}"),
        description: "Document created by a test".to_string(),
        category: "Testing".to_string(),
        file_type: "PDF".to_string(),
        file_size: None,
        file_url: "/documents/test.pdf".to_string(),
        upload_date: "2024-01-01".to_string(),
        download_count: 0,
        is_default: false,
    }
}

/// Custom service with a single flat fee, neither featured nor digital.
#[must_use]
pub fn sample_service(id: &str) -> CountyService {
    CountyService {
        id: id.to_string(),
        title: format!("Test service {id}"),
        description: "Service created by a test".to_string(),
        category: "testing".to_string(),
        icon: "🧪".to_string(),
        fees: vec![ServiceFee {
            description: "Flat fee".to_string(),
            amount: 100.0,
            period: None,
        }],
        requirements: vec!["National ID".to_string()],
        processing_time: None,
        location: Vec::new(),
        digital_available: false,
        featured: false,
        contact_info: None,
        is_default: false,
    }
}
