//! Downloadable forms, reports and documents.

use crate::core::store::{
    ContentEntity, ContentStore, InsertPosition, MutationOutcome, parse_date, sort_by_date_desc,
};
use crate::storage::KeyValueStore;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Downloadable document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Download {
    /// Stable identifier
    pub id: String,
    /// Document title
    pub title: String,
    /// What the document is for
    pub description: String,
    /// Free-form category (e.g., "Forms")
    pub category: String,
    /// File format label (e.g., "PDF")
    pub file_type: String,
    /// Human-readable size (e.g., "2.5 MB")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<String>,
    /// Link to the file
    pub file_url: String,
    /// Upload date, `YYYY-MM-DD`
    pub upload_date: String,
    /// Times the file was downloaded
    #[serde(default)]
    pub download_count: u64,
    /// Built-in entry flag
    #[serde(default)]
    pub is_default: bool,
}

impl Download {
    /// Parsed upload date
    #[must_use]
    pub fn uploaded_on(&self) -> Option<NaiveDate> {
        parse_date(&self.upload_date)
    }
}

impl ContentEntity for Download {
    const KIND: &'static str = "download";
    const STORAGE_KEY: &'static str = "downloads";
    const DEFAULT_IDS: &'static [&'static str] = &[
        "download-budget-2024-25",
        "download-sbp-form",
        "download-land-rates-form",
        "download-parking-permit-form",
        "download-county-strategic-plan",
        "download-revenue-report-2024",
        "download-building-permit-form",
        "download-market-stall-form",
        "download-health-certificate-form",
        "download-water-connection-form",
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
        default_downloads()
    }

    fn matches_search(&self, term: &str) -> bool {
        [&self.title, &self.description, &self.category]
            .iter()
            .any(|field| field.to_lowercase().contains(term))
    }
}

impl<S: KeyValueStore> ContentStore<Download, S> {
    /// Documents in exactly this category
    #[must_use]
    pub fn by_category(&self, category: &str) -> Vec<Download> {
        self.filter(|download| download.category == category)
    }

    /// Most downloaded first, optionally capped at `limit` (zero means all)
    #[must_use]
    pub fn most_downloaded(&self, limit: Option<usize>) -> Vec<Download> {
        let mut sorted = self.current().to_vec();
        sorted.sort_by(|a, b| b.download_count.cmp(&a.download_count));
        if let Some(limit) = limit.filter(|&n| n > 0) {
            sorted.truncate(limit);
        }
        sorted
    }

    /// Newest uploads first, optionally capped at `limit` (zero means all)
    #[must_use]
    pub fn recent_uploads(&self, limit: Option<usize>) -> Vec<Download> {
        sort_by_date_desc(self.current().to_vec(), Download::uploaded_on, limit)
    }

    /// Counts one download. Allowed on built-in documents too; the counter is
    /// bookkeeping, not protected content.
    pub async fn increment_download_count(&self, id: &str) -> MutationOutcome {
        self.modify(id, |download| {
            download.download_count = download.download_count.saturating_add(1);
        })
        .await
    }
}

#[allow(clippy::too_many_arguments)]
fn download(
    id: &str,
    title: &str,
    description: &str,
    category: &str,
    file_size: &str,
    file_url: &str,
    upload_date: &str,
    download_count: u64,
) -> Download {
    Download {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        file_type: "PDF".to_string(),
        file_size: Some(file_size.to_string()),
        file_url: file_url.to_string(),
        upload_date: upload_date.to_string(),
        download_count,
        is_default: true,
    }
}

#[allow(clippy::too_many_lines)]
fn default_downloads() -> Vec<Download> {
    vec![
        download(
            "download-budget-2024-25",
            "County Budget 2024/2025",
            "Annual county budget allocation and expenditure plan for fiscal year 2024/2025",
            "Finance",
            "2.5 MB",
            "/documents/downloads/budget-2024-25.pdf",
            "2024-07-01",
            245,
        ),
        download(
            "download-sbp-form",
            "Single Business Permit Application Form",
            "Official form for single business permit (SBP) application and renewal",
            "Licenses",
            "500 KB",
            "/documents/forms/sbp-application-form.pdf",
            "2024-08-15",
            892,
        ),
        download(
            "download-land-rates-form",
            "Land Rates Payment Form",
            "Form for property rates payment and assessment",
            "Forms",
            "350 KB",
            "/documents/forms/land-rates-form.pdf",
            "2024-08-20",
            456,
        ),
        download(
            "download-parking-permit-form",
            "Monthly Parking Permit Application",
            "Application form for monthly parking permits in designated zones",
            "Forms",
            "280 KB",
            "/documents/forms/parking-permit-form.pdf",
            "2024-09-01",
            327,
        ),
        download(
            "download-county-strategic-plan",
            "County Integrated Development Plan (CIDP)",
            "Embu County Integrated Development Plan 2023-2027",
            "Reports",
            "5.8 MB",
            "/documents/reports/cidp-2023-2027.pdf",
            "2024-01-15",
            678,
        ),
        download(
            "download-revenue-report-2024",
            "Annual Revenue Performance Report 2023/2024",
            "Comprehensive report on county revenue collection and performance",
            "Reports",
            "3.2 MB",
            "/documents/reports/revenue-report-2023-24.pdf",
            "2024-07-30",
            412,
        ),
        download(
            "download-building-permit-form",
            "Building Permit Application Form",
            "Application form for building plan approval and construction permits",
            "Licenses",
            "650 KB",
            "/documents/forms/building-permit-form.pdf",
            "2024-08-10",
            534,
        ),
        download(
            "download-market-stall-form",
            "Market Stall Allocation Form",
            "Application form for allocation of market stalls in county markets",
            "Forms",
            "300 KB",
            "/documents/forms/market-stall-form.pdf",
            "2024-09-05",
            289,
        ),
        download(
            "download-health-certificate-form",
            "Food Handler Certificate Application",
            "Medical examination form for food handlers certificate",
            "Forms",
            "250 KB",
            "/documents/forms/food-handler-form.pdf",
            "2024-08-25",
            523,
        ),
        download(
            "download-water-connection-form",
            "Water Connection Application Form",
            "Application form for new water connection services",
            "Forms",
            "400 KB",
            "/documents/forms/water-connection-form.pdf",
            "2024-09-10",
            367,
        ),
    ]
}
