//! County departments and the revenue streams each one collects.

use crate::core::store::{ContentEntity, ContentStore, InsertPosition};
use crate::storage::KeyValueStore;
use serde::{Deserialize, Serialize};

/// One revenue line collected by a department
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueStream {
    /// Display name (e.g., "Market Fees")
    pub name: String,
    /// Short explanation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// County department
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    /// Stable identifier
    pub id: String,
    /// Full department name
    pub name: String,
    /// Shorter name for compact listings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    /// Emoji shown next to the name
    pub icon: String,
    /// What the department does
    pub description: String,
    /// Revenue lines the department collects
    #[serde(default)]
    pub revenue_streams: Vec<RevenueStream>,
    /// Annual revenue in KES
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_revenue: Option<f64>,
    /// Built-in entry flag
    #[serde(default)]
    pub is_default: bool,
}

impl Department {
    /// Short name when set, full name otherwise
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.short_name.as_deref().unwrap_or(&self.name)
    }
}

impl ContentEntity for Department {
    const KIND: &'static str = "department";
    const STORAGE_KEY: &'static str = "departments";
    const DEFAULT_IDS: &'static [&'static str] = &[
        "finance",
        "trade-tourism",
        "lands-housing",
        "administration",
        "roads-transport",
        "youth-gender",
        "education",
        "agriculture",
        "water-environment",
        "health",
    ];
    const INSERT_POSITION: InsertPosition = InsertPosition::Back;

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
        default_departments()
    }

    fn matches_search(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(term)
            || self.description.to_lowercase().contains(term)
            || self
                .revenue_streams
                .iter()
                .any(|stream| stream.name.to_lowercase().contains(term))
    }
}

impl<S: KeyValueStore> ContentStore<Department, S> {
    /// Sum of every department's revenue; departments without a figure count as zero.
    #[must_use]
    pub fn total_revenue(&self) -> f64 {
        self.current()
            .iter()
            .map(|dept| dept.total_revenue.unwrap_or(0.0))
            .sum()
    }
}

fn stream(name: &str, description: &str) -> RevenueStream {
    RevenueStream {
        name: name.to_string(),
        description: Some(description.to_string()),
    }
}

fn department(
    id: &str,
    name: &str,
    short_name: &str,
    icon: &str,
    description: &str,
    total_revenue: f64,
    revenue_streams: Vec<RevenueStream>,
) -> Department {
    Department {
        id: id.to_string(),
        name: name.to_string(),
        short_name: Some(short_name.to_string()),
        icon: icon.to_string(),
        description: description.to_string(),
        revenue_streams,
        total_revenue: Some(total_revenue),
        is_default: true,
    }
}

#[allow(clippy::too_many_lines)]
fn default_departments() -> Vec<Department> {
    vec![
        department(
            "finance",
            "Finance & Economic Planning (ECRA)",
            "Finance & Economic Planning",
            "💰",
            "Responsible for financial planning, budgeting, and various revenue collection activities including market operations and business permits.",
            185_000_000.0,
            vec![
                stream("SBP (Single Business Permit)", "Business licensing and permits"),
                stream("Stalls Rent", "Market stall rental fees"),
                stream("Market Fees", "Market operation and trading fees"),
                stream("Miraa Fees", "Miraa trading and licensing fees"),
                stream("Buspark", "Bus park and transport terminal fees"),
                stream("Street Parking", "Street parking and metered parking fees"),
                stream("Cess", "Agricultural produce cess collection"),
                stream("Advert Fees", "Advertisement and signage fees"),
                stream("Miscellaneous", "Other miscellaneous revenue"),
                stream("Technical Fees", "Technical services and consultations"),
                stream("Audit Fee", "Audit and compliance services"),
                stream("Public Health (Sub County)", "Public health fees"),
            ],
        ),
        department(
            "trade-tourism",
            "Trade, Tourism, Investment and Industrialization",
            "Trade & Tourism",
            "🏢",
            "Promotes trade, tourism, investment opportunities and manages related revenue streams.",
            125_000_000.0,
            vec![
                stream("Liquor", "Liquor licensing and permits"),
                stream("Weights", "Weights and measures certification"),
                stream("Mwea National Park", "Tourism and park-related fees"),
            ],
        ),
        department(
            "lands-housing",
            "Lands, Housing, Physical Planning and Urban Development",
            "Lands, Housing & Urban Development",
            "🏘️",
            "Handles land administration, housing, physical planning and urban development revenue.",
            165_000_000.0,
            vec![
                stream("Land Rates", "Property rates and land taxes"),
                stream("Subdivision", "Land subdivision and planning fees"),
                stream("House Rent", "County housing rental income"),
            ],
        ),
        department(
            "administration",
            "Administration, Public Service & ICT",
            "Administration & ICT",
            "⚙️",
            "Manages administrative services, public service delivery and ICT infrastructure.",
            95_000_000.0,
            vec![stream("Enforcement", "Revenue enforcement and compliance fees")],
        ),
        department(
            "roads-transport",
            "Roads, Transport & Public Works",
            "Roads & Transport",
            "🚧",
            "Responsible for road infrastructure, transport services and public works projects.",
            112_000_000.0,
            vec![stream("Cemetery", "Cemetery services and burial fees")],
        ),
        department(
            "youth-gender",
            "Youth, Gender, Sports, Culture & Social Services",
            "Youth, Gender & Sports",
            "🏃",
            "Promotes youth development, gender equality, sports, culture and social services.",
            78_000_000.0,
            vec![stream("Youth Empowerment", "Youth development programs and services")],
        ),
        department(
            "education",
            "Education",
            "Education",
            "📚",
            "Manages educational services, libraries and early childhood development programs.",
            102_000_000.0,
            vec![
                stream("Library Fees", "Library services and membership fees"),
                stream(
                    "ECDE Approvals/Inspection",
                    "Early Childhood Development Education approvals",
                ),
            ],
        ),
        department(
            "agriculture",
            "Agriculture, Livestock & Co-operative Development",
            "Agriculture & Livestock",
            "🌾",
            "Supports agricultural development, livestock management and cooperative societies.",
            142_000_000.0,
            vec![
                stream("Veterinary", "Veterinary services and livestock fees"),
                stream("Slaughter Fees", "Slaughterhouse and meat inspection fees"),
                stream(
                    "AMS (Agricultural Marketing Services)",
                    "Agricultural marketing and storage services",
                ),
                stream("Coffee Pulping", "Coffee processing and pulping fees"),
                stream("Fisheries", "Fisheries licensing and management fees"),
            ],
        ),
        department(
            "water-environment",
            "Water, Irrigation, Environment, Climate Change & Natural Resources",
            "Water & Environment",
            "💧",
            "Manages water resources, irrigation, environmental conservation and climate change initiatives.",
            128_000_000.0,
            vec![
                stream("Water and Irrigation", "Water supply and irrigation services"),
                stream(
                    "Borehole Drilling Charges",
                    "Borehole drilling and water point services",
                ),
                stream(
                    "Environment & Conservancy Administration Fees",
                    "Environmental management and conservation fees",
                ),
            ],
        ),
        department(
            "health",
            "Health Services",
            "Health",
            "🏥",
            "Comprehensive healthcare delivery through various health facilities across the county.",
            245_000_000.0,
            vec![
                stream("Embu L5", "Level 5 Hospital - Embu Referral Hospital"),
                stream("Runyenjes L4", "Level 4 Hospital - Runyenjes Sub-County Hospital"),
                stream("Siakago L4", "Level 4 Hospital - Siakago Sub-County Hospital"),
                stream("Ishiara L4", "Level 4 Hospital - Ishiara Sub-County Hospital"),
                stream("Kianjokoma L4", "Level 4 Hospital - Kianjokoma Sub-County Hospital"),
                stream("Kiritiri L4", "Level 4 Hospital - Kiritiri Sub-County Hospital"),
                stream("Gategi L4", "Level 4 Hospital - Gategi Sub-County Hospital"),
                stream("Level 3s", "Level 3 Health Centers across the county"),
                stream("Level 2s", "Level 2 Dispensaries and community health facilities"),
                stream(
                    "Public Health Services",
                    "General public health services and programs",
                ),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::test_utils::{init_test_tracing, sample_department};

    async fn store() -> ContentStore<Department, MemoryStorage> {
        init_test_tracing();
        ContentStore::open(MemoryStorage::new(), "embu_departments").await
    }

    #[test]
    fn test_defaults_match_default_ids() {
        let ids: Vec<String> = Department::defaults().into_iter().map(|d| d.id).collect();
        assert_eq!(ids, Department::DEFAULT_IDS);
        assert!(Department::defaults().iter().all(|d| d.is_default));
    }

    #[tokio::test]
    async fn test_total_revenue_of_defaults() {
        let store = store().await;
        assert_eq!(store.total_revenue(), 1_377_000_000.0);
    }

    #[tokio::test]
    async fn test_total_revenue_counts_missing_as_zero() {
        let store = store().await;
        let mut custom = sample_department("dept-no-revenue");
        custom.total_revenue = None;
        assert!(store.add(custom).await.is_applied());

        let mut funded = sample_department("dept-funded");
        funded.total_revenue = Some(1_000.0);
        assert!(store.add(funded).await.is_applied());

        assert_eq!(store.total_revenue(), 1_377_001_000.0);
    }

    #[tokio::test]
    async fn test_search_matches_revenue_streams() {
        let store = store().await;
        let hits = store.search("slaughter");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "agriculture");
    }

    #[test]
    fn test_display_name_prefers_short_name() {
        let mut dept = sample_department("x");
        dept.short_name = Some("Short".to_string());
        assert_eq!(dept.display_name(), "Short");
        dept.short_name = None;
        assert_eq!(dept.display_name(), dept.name);
    }

    #[test]
    fn test_camel_case_wire_format() {
        let json = serde_json::to_value(sample_department("dept-json")).unwrap();
        assert!(json.get("revenueStreams").is_some());
        assert_eq!(json["isDefault"], false);

        let parsed: Department = serde_json::from_str(
            r#"{"id":"d","name":"N","icon":"i","description":"x"}"#,
        )
        .unwrap();
        assert!(!parsed.is_default);
        assert!(parsed.revenue_streams.is_empty());
    }
}
