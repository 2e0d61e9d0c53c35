//! Citizen-facing county services and what they cost.

use crate::core::store::{ContentEntity, ContentStore, InsertPosition};
use crate::storage::KeyValueStore;
use serde::{Deserialize, Serialize};

/// One line of a service's fee schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceFee {
    /// What the fee covers
    pub description: String,
    /// Amount in KES; zero when the rate depends on a valuation
    pub amount: f64,
    /// Billing period or rate note (e.g., "monthly")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
}

/// County service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountyService {
    /// Stable identifier
    pub id: String,
    /// Service name
    pub title: String,
    /// What the service is
    pub description: String,
    /// Category id (e.g., "business", "property")
    pub category: String,
    /// Emoji shown next to the title
    pub icon: String,
    /// Fee schedule
    #[serde(default)]
    pub fees: Vec<ServiceFee>,
    /// Documents the applicant must bring
    #[serde(default)]
    pub requirements: Vec<String>,
    /// Typical turnaround
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_time: Option<String>,
    /// Where the service is offered
    #[serde(default)]
    pub location: Vec<String>,
    /// Can be completed online
    #[serde(default)]
    pub digital_available: bool,
    /// Shown in the featured strip
    #[serde(default)]
    pub featured: bool,
    /// Responsible office
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<String>,
    /// Built-in entry flag
    #[serde(default)]
    pub is_default: bool,
}

impl ContentEntity for CountyService {
    const KIND: &'static str = "service";
    const STORAGE_KEY: &'static str = "services";
    const DEFAULT_IDS: &'static [&'static str] = &[
        "single-business-permit",
        "property-rates",
        "parking-fees",
        "market-stalls",
        "land-subdivision",
        "building-permit",
        "liquor-license",
        "health-certificate",
        "agriculture-cess",
        "water-connection",
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
        default_services()
    }

    fn matches_search(&self, term: &str) -> bool {
        [&self.title, &self.description, &self.category]
            .iter()
            .any(|field| field.to_lowercase().contains(term))
    }
}

impl<S: KeyValueStore> ContentStore<CountyService, S> {
    /// Services in exactly this category
    #[must_use]
    pub fn by_category(&self, category: &str) -> Vec<CountyService> {
        self.filter(|service| service.category == category)
    }

    /// Services flagged as featured
    #[must_use]
    pub fn featured(&self) -> Vec<CountyService> {
        self.filter(|service| service.featured)
    }

    /// Services that can be completed online
    #[must_use]
    pub fn digital_available(&self) -> Vec<CountyService> {
        self.filter(|service| service.digital_available)
    }
}

fn fee(description: &str, amount: f64, period: Option<&str>) -> ServiceFee {
    ServiceFee {
        description: description.to_string(),
        amount,
        period: period.map(ToString::to_string),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

struct Seed<'a> {
    id: &'a str,
    title: &'a str,
    description: &'a str,
    category: &'a str,
    icon: &'a str,
    fees: Vec<ServiceFee>,
    requirements: &'a [&'a str],
    processing_time: &'a str,
    location: &'a [&'a str],
    digital_available: bool,
    featured: bool,
    contact_info: &'a str,
}

impl Seed<'_> {
    fn build(self) -> CountyService {
        CountyService {
            id: self.id.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            category: self.category.to_string(),
            icon: self.icon.to_string(),
            fees: self.fees,
            requirements: strings(self.requirements),
            processing_time: Some(self.processing_time.to_string()),
            location: strings(self.location),
            digital_available: self.digital_available,
            featured: self.featured,
            contact_info: Some(self.contact_info.to_string()),
            is_default: true,
        }
    }
}

#[allow(clippy::too_many_lines)]
fn default_services() -> Vec<CountyService> {
    let varies = Some("Rate varies by valuation");
    let plinth = Some("Based on plinth area");
    let per_kg = Some("Per kg - rate varies");

    vec![
        Seed {
            id: "single-business-permit",
            title: "Single Business Permit (SBP)",
            description: "Unified business licensing system combining multiple permits into one comprehensive permit for ease of doing business.",
            category: "business",
            icon: "📋",
            fees: vec![
                fee("Small Business (Turnover < 1M)", 3000.0, None),
                fee("Medium Business (1M - 5M)", 10000.0, None),
                fee("Large Business (> 5M)", 25000.0, None),
            ],
            requirements: &[
                "Business Registration Certificate",
                "National ID/Passport",
                "KRA PIN Certificate",
                "Lease Agreement/Title Deed",
            ],
            processing_time: "3-5 working days",
            location: &["ECRA Offices - Embu", "Sub-County Offices", "Online Portal"],
            digital_available: true,
            featured: true,
            contact_info: "Revenue Office, Embu County HQ",
        }
        .build(),
        Seed {
            id: "property-rates",
            title: "Property Rates Payment",
            description: "Annual property tax based on the unimproved site value of land and properties within the county.",
            category: "property",
            icon: "🏠",
            fees: vec![
                fee("Residential Property", 0.0, varies),
                fee("Commercial Property", 0.0, varies),
            ],
            requirements: &["Title Deed", "National ID", "Previous Rate Payment Receipt"],
            processing_time: "Immediate",
            location: &["ECRA Offices", "Online Portal", "Mobile Money"],
            digital_available: true,
            featured: true,
            contact_info: "Lands Office, Embu County",
        }
        .build(),
        Seed {
            id: "parking-fees",
            title: "Digital Parking Payment",
            description: "Convenient digital payment system for vehicle parking in designated county parking zones.",
            category: "transport",
            icon: "🅿️",
            fees: vec![
                fee("Hourly Parking", 20.0, Some("per hour")),
                fee("Daily Parking", 100.0, Some("per day")),
                fee("Monthly Pass", 1500.0, Some("monthly")),
            ],
            requirements: &["Vehicle Registration", "Mobile Phone"],
            processing_time: "Instant",
            location: &["CBD Parking Zones", "Mobile App", "SMS Service"],
            digital_available: true,
            featured: true,
            contact_info: "Transport Department",
        }
        .build(),
        Seed {
            id: "market-stalls",
            title: "Market Stall Allocation",
            description: "Rental and allocation of market stalls in county markets for trade and business activities.",
            category: "business",
            icon: "🏪",
            fees: vec![
                fee("Permanent Stall", 2000.0, Some("monthly")),
                fee("Temporary Stall", 100.0, Some("daily")),
            ],
            requirements: &["National ID", "Medical Certificate"],
            processing_time: "Same day",
            location: &["Various County Markets", "Market Administration Offices"],
            digital_available: true,
            featured: false,
            contact_info: "Market Administration",
        }
        .build(),
        Seed {
            id: "land-subdivision",
            title: "Land Subdivision Approval",
            description: "Process land subdivision applications and approve planning layouts for land parcels.",
            category: "property",
            icon: "📐",
            fees: vec![
                fee("Small Plot (< 1 Acre)", 5000.0, None),
                fee("Medium Plot (1-5 Acres)", 15000.0, None),
                fee("Large Plot (> 5 Acres)", 30000.0, None),
            ],
            requirements: &[
                "Title Deed",
                "Survey Plan",
                "National ID",
                "Land Rates Clearance Certificate",
            ],
            processing_time: "14-21 working days",
            location: &["Lands Office - Embu County HQ", "Sub-County Lands Offices"],
            digital_available: false,
            featured: false,
            contact_info: "Physical Planning Department",
        }
        .build(),
        Seed {
            id: "building-permit",
            title: "Building Permit Application",
            description: "Obtain approval for construction, renovation, or alteration of buildings and structures.",
            category: "property",
            icon: "🏗️",
            fees: vec![
                fee("Residential Building", 0.0, plinth),
                fee("Commercial Building", 0.0, plinth),
            ],
            requirements: &[
                "Architectural Drawings",
                "Structural Drawings",
                "Title Deed",
                "Site Plan",
                "National ID",
            ],
            processing_time: "21-30 working days",
            location: &["Physical Planning Office", "County HQ"],
            digital_available: false,
            featured: true,
            contact_info: "Building Approvals Office",
        }
        .build(),
        Seed {
            id: "liquor-license",
            title: "Liquor Licensing",
            description: "Application and renewal of licenses for sale and distribution of alcoholic beverages.",
            category: "business",
            icon: "🍷",
            fees: vec![
                fee("Bar License", 15000.0, Some("annually")),
                fee("Restaurant License", 10000.0, Some("annually")),
                fee("Wine & Spirits License", 20000.0, Some("annually")),
            ],
            requirements: &[
                "Business Permit",
                "Certificate of Good Conduct",
                "Lease Agreement",
                "Medical Certificate",
                "Food Handler Certificate",
            ],
            processing_time: "10-14 working days",
            location: &["Trade Department", "ECRA Offices"],
            digital_available: true,
            featured: false,
            contact_info: "Liquor Licensing Board",
        }
        .build(),
        Seed {
            id: "health-certificate",
            title: "Food Handler Certificate",
            description: "Medical examination and certification for food handlers and business operators.",
            category: "health",
            icon: "🏥",
            fees: vec![
                fee("Individual Certificate", 500.0, None),
                fee("Business Inspection", 2000.0, None),
            ],
            requirements: &["National ID", "Passport Photo", "Medical Examination Form"],
            processing_time: "1-2 working days",
            location: &["County Health Facilities", "Public Health Offices"],
            digital_available: false,
            featured: false,
            contact_info: "Public Health Department",
        }
        .build(),
        Seed {
            id: "agriculture-cess",
            title: "Agricultural Produce Cess",
            description: "Payment of cess on agricultural produce transported within or outside the county.",
            category: "agriculture",
            icon: "🌾",
            fees: vec![
                fee("Coffee", 0.0, per_kg),
                fee("Tea", 0.0, per_kg),
                fee("Miraa", 0.0, per_kg),
                fee("Other Produce", 0.0, Some("Rate varies by product")),
            ],
            requirements: &["Movement Permit", "National ID", "Vehicle Registration"],
            processing_time: "Immediate",
            location: &["Cess Collection Points", "Market Centers"],
            digital_available: true,
            featured: false,
            contact_info: "Agriculture Department",
        }
        .build(),
        Seed {
            id: "water-connection",
            title: "Water Connection Service",
            description: "New water connection application and billing services for residential and commercial properties.",
            category: "utilities",
            icon: "💧",
            fees: vec![
                fee("Domestic Connection", 8000.0, None),
                fee("Commercial Connection", 15000.0, None),
            ],
            requirements: &["Title Deed/Lease Agreement", "National ID", "Site Plan"],
            processing_time: "7-14 working days",
            location: &["Water Department", "County HQ"],
            digital_available: true,
            featured: true,
            contact_info: "Water Services Department",
        }
        .build(),
    ]
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::test_utils::{init_test_tracing, sample_service};

    async fn store() -> ContentStore<CountyService, MemoryStorage> {
        init_test_tracing();
        ContentStore::open(MemoryStorage::new(), "embu_services").await
    }

    fn ids(services: &[CountyService]) -> Vec<&str> {
        services.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_defaults_match_default_ids() {
        assert_eq!(ids(&CountyService::defaults()), CountyService::DEFAULT_IDS);
    }

    #[tokio::test]
    async fn test_flag_filters() {
        let store = store().await;
        assert_eq!(
            ids(&store.featured()),
            vec![
                "single-business-permit",
                "property-rates",
                "parking-fees",
                "building-permit",
                "water-connection",
            ]
        );
        assert_eq!(store.digital_available().len(), 7);
    }

    #[tokio::test]
    async fn test_by_category() {
        let store = store().await;
        assert_eq!(
            ids(&store.by_category("property")),
            vec!["property-rates", "land-subdivision", "building-permit"]
        );
    }

    #[tokio::test]
    async fn test_custom_service_is_prepended() {
        let store = store().await;
        assert!(store.add(sample_service("service-custom")).await.is_applied());
        assert_eq!(store.current()[0].id, "service-custom");
        assert_eq!(store.custom_count(), 1);
    }
}
