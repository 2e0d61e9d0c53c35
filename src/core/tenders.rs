//! Procurement tenders advertised by the county.

use crate::core::store::{ContentEntity, ContentStore, InsertPosition, parse_date};
use crate::storage::KeyValueStore;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a tender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TenderStatus {
    /// Accepting bids
    Open,
    /// Bidding finished
    Closed,
    /// Contract awarded
    Awarded,
}

impl TenderStatus {
    /// Every status, in display order
    pub const ALL: [Self; 3] = [Self::Open, Self::Closed, Self::Awarded];

    /// Lowercase wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Awarded => "awarded",
        }
    }
}

impl fmt::Display for TenderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Procurement tender
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tender {
    /// Stable identifier
    pub id: String,
    /// Tender title
    pub title: String,
    /// Scope of work
    pub description: String,
    /// Free-form category (e.g., "Infrastructure")
    pub category: String,
    /// First day bids are accepted, `YYYY-MM-DD`
    pub opening_date: String,
    /// Last day bids are accepted, `YYYY-MM-DD`
    pub closing_date: String,
    /// Current status
    pub status: TenderStatus,
    /// Estimated value in KES
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Tender document link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_url: Option<String>,
    /// Built-in entry flag
    #[serde(default)]
    pub is_default: bool,
}

impl Tender {
    /// Parsed closing date
    #[must_use]
    pub fn closes_on(&self) -> Option<NaiveDate> {
        parse_date(&self.closing_date)
    }
}

impl ContentEntity for Tender {
    const KIND: &'static str = "tender";
    const STORAGE_KEY: &'static str = "tenders";
    const DEFAULT_IDS: &'static [&'static str] = &[
        "tender-road-embu-2024",
        "tender-medical-equipment-2024",
        "tender-water-supply-2024",
        "tender-ict-infrastructure-2024",
        "tender-market-modernization-2024",
        "tender-waste-management-2024",
    ];
    const INSERT_POSITION: InsertPosition = InsertPosition::Front;

    fn id(&self) -> &str {
        &self.id
    }

    fn is_default(&self) -> bool {
        self.is_default
    }

    fn set_default(&mut self, is_default: bool) {
        self.is_default = is_default;
    }

    fn defaults() -> Vec<Self> {
        default_tenders()
    }

    fn matches_search(&self, term: &str) -> bool {
        [&self.title, &self.description, &self.category]
            .iter()
            .any(|field| field.to_lowercase().contains(term))
    }
}

impl<S: KeyValueStore> ContentStore<Tender, S> {
    /// Tenders still accepting bids
    #[must_use]
    pub fn open_tenders(&self) -> Vec<Tender> {
        self.filter(|tender| tender.status == TenderStatus::Open)
    }

    /// Tenders in exactly this category
    #[must_use]
    pub fn by_category(&self, category: &str) -> Vec<Tender> {
        self.filter(|tender| tender.category == category)
    }
}

#[allow(clippy::too_many_arguments)]
fn tender(
    id: &str,
    title: &str,
    description: &str,
    category: &str,
    opening_date: &str,
    closing_date: &str,
    status: TenderStatus,
    value: f64,
    document: &str,
) -> Tender {
    Tender {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        opening_date: opening_date.to_string(),
        closing_date: closing_date.to_string(),
        status,
        value: Some(value),
        document_url: Some(format!("/documents/tenders/{document}")),
        is_default: true,
    }
}

fn default_tenders() -> Vec<Tender> {
    vec![
        tender(
            "tender-road-embu-2024",
            "Road Construction Project - Embu Town",
            "Construction and rehabilitation of 5km road network in Embu town including drainage systems, street lighting, and pedestrian walkways.",
            "Infrastructure",
            "2024-10-01",
            "2024-11-15",
            TenderStatus::Open,
            25_000_000.0,
            "road-embu-2024.pdf",
        ),
        tender(
            "tender-medical-equipment-2024",
            "Supply of Medical Equipment",
            "Procurement of modern medical equipment for Level 4 hospitals across Embu County including ultrasound machines, patient monitors, and laboratory equipment.",
            "Health",
            "2024-09-15",
            "2024-10-30",
            TenderStatus::Open,
            15_000_000.0,
            "medical-equipment-2024.pdf",
        ),
        tender(
            "tender-water-supply-2024",
            "Water Supply Infrastructure Upgrade",
            "Upgrading water supply systems in rural areas including drilling of boreholes, installation of water tanks, and pipeline network expansion.",
            "Water & Environment",
            "2024-11-01",
            "2024-12-15",
            TenderStatus::Open,
            18_000_000.0,
            "water-supply-2024.pdf",
        ),
        tender(
            "tender-ict-infrastructure-2024",
            "ICT Infrastructure Development",
            "Supply, installation and configuration of ICT equipment for county offices including computers, servers, networking equipment and software licenses.",
            "ICT",
            "2024-10-15",
            "2024-11-30",
            TenderStatus::Open,
            12_000_000.0,
            "ict-infrastructure-2024.pdf",
        ),
        tender(
            "tender-market-modernization-2024",
            "Market Modernization Project",
            "Construction and modernization of county markets including stalls, sanitation facilities, waste management systems and parking areas.",
            "Trade & Commerce",
            "2024-09-20",
            "2024-11-05",
            TenderStatus::Open,
            22_000_000.0,
            "market-modernization-2024.pdf",
        ),
        tender(
            "tender-waste-management-2024",
            "Solid Waste Management Services",
            "Provision of solid waste collection, transportation and disposal services for Embu County including supply of waste collection equipment.",
            "Environment",
            "2024-08-01",
            "2024-10-15",
            TenderStatus::Closed,
            8_000_000.0,
            "waste-management-2024.pdf",
        ),
    ]
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::store::{MutationOutcome, Rejection};
    use crate::storage::MemoryStorage;
    use crate::test_utils::{init_test_tracing, sample_tender};

    async fn store() -> ContentStore<Tender, MemoryStorage> {
        init_test_tracing();
        ContentStore::open(MemoryStorage::new(), "embu_tenders").await
    }

    #[test]
    fn test_defaults_match_default_ids() {
        let ids: Vec<String> = Tender::defaults().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, Tender::DEFAULT_IDS);
    }

    #[test]
    fn test_status_wire_names() {
        for status in TenderStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{status}\""));
        }
        let parsed: TenderStatus = serde_json::from_str("\"awarded\"").unwrap();
        assert_eq!(parsed, TenderStatus::Awarded);
    }

    #[tokio::test]
    async fn test_open_tenders_excludes_closed() {
        let store = store().await;
        let open = store.open_tenders();
        assert_eq!(open.len(), 5);
        assert!(open.iter().all(|t| t.id != "tender-waste-management-2024"));
    }

    #[tokio::test]
    async fn test_closing_a_custom_tender() {
        let store = store().await;
        assert!(store.add(sample_tender("tender-custom")).await.is_applied());
        assert_eq!(store.open_tenders().len(), 6);

        let mut closed = store.by_id("tender-custom").unwrap();
        closed.status = TenderStatus::Awarded;
        assert!(store.update("tender-custom", closed).await.is_applied());
        assert_eq!(store.open_tenders().len(), 5);
    }

    #[tokio::test]
    async fn test_default_tender_status_is_protected() {
        let store = store().await;
        let mut attempt = store.by_id("tender-road-embu-2024").unwrap();
        attempt.status = TenderStatus::Closed;

        let outcome = store.update("tender-road-embu-2024", attempt).await;
        assert!(matches!(
            outcome,
            MutationOutcome::Rejected(Rejection::ProtectedEntity { .. })
        ));
        assert_eq!(
            store.by_id("tender-road-embu-2024").unwrap().status,
            TenderStatus::Open
        );
    }

    #[tokio::test]
    async fn test_category_and_search() {
        let store = store().await;
        assert_eq!(store.by_category("ICT").len(), 1);
        assert_eq!(store.search("borehole").len(), 1);
        assert_eq!(
            store.by_id("tender-water-supply-2024").unwrap().closes_on(),
            NaiveDate::from_ymd_opt(2024, 12, 15)
        );
    }
}
