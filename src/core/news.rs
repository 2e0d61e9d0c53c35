//! News articles published on the portal.

use crate::core::store::{
    ContentEntity, ContentStore, InsertPosition, parse_date, sort_by_date_desc,
};
use crate::storage::KeyValueStore;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// News article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    /// Stable identifier
    pub id: String,
    /// Headline
    pub title: String,
    /// Full article body
    pub content: String,
    /// One-line teaser
    pub summary: String,
    /// Free-form category (e.g., "Health")
    pub category: String,
    /// Byline
    pub author: String,
    /// Publication date, `YYYY-MM-DD`
    pub publish_date: String,
    /// Header image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Shown in the featured strip
    #[serde(default)]
    pub featured: bool,
    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Built-in entry flag
    #[serde(default)]
    pub is_default: bool,
}

impl NewsArticle {
    /// Parsed publication date, `None` when the stored string is not a date
    #[must_use]
    pub fn published_on(&self) -> Option<NaiveDate> {
        parse_date(&self.publish_date)
    }
}

impl ContentEntity for NewsArticle {
    const KIND: &'static str = "news article";
    const STORAGE_KEY: &'static str = "news";
    const DEFAULT_IDS: &'static [&'static str] = &[
        "news-digital-revenue-2024",
        "news-public-participation-2024",
        "news-healthcare-initiative-2024",
        "news-road-infrastructure-2024",
        "news-education-program-2024",
        "news-revenue-collection-2024",
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
        default_news()
    }

    fn matches_search(&self, term: &str) -> bool {
        [&self.title, &self.summary, &self.category, &self.author]
            .iter()
            .any(|field| field.to_lowercase().contains(term))
    }
}

impl<S: KeyValueStore> ContentStore<NewsArticle, S> {
    /// Articles flagged as featured
    #[must_use]
    pub fn featured(&self) -> Vec<NewsArticle> {
        self.filter(|article| article.featured)
    }

    /// Articles in exactly this category
    #[must_use]
    pub fn by_category(&self, category: &str) -> Vec<NewsArticle> {
        self.filter(|article| article.category == category)
    }

    /// Newest first, optionally capped at `limit` (zero means all)
    #[must_use]
    pub fn recent(&self, limit: Option<usize>) -> Vec<NewsArticle> {
        sort_by_date_desc(self.current().to_vec(), NewsArticle::published_on, limit)
    }
}

#[allow(clippy::too_many_arguments)]
fn article(
    id: &str,
    title: &str,
    summary: &str,
    content: &str,
    category: &str,
    author: &str,
    publish_date: &str,
    featured: bool,
    tags: &[&str],
) -> NewsArticle {
    NewsArticle {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        summary: summary.to_string(),
        category: category.to_string(),
        author: author.to_string(),
        publish_date: publish_date.to_string(),
        image_url: None,
        featured,
        tags: tags.iter().map(ToString::to_string).collect(),
        is_default: true,
    }
}

#[allow(clippy::too_many_lines)]
fn default_news() -> Vec<NewsArticle> {
    vec![
        article(
            "news-digital-revenue-2024",
            "New Digital Revenue System Launched",
            "The county introduces a new digital platform to improve revenue collection efficiency.",
            "Embu County has officially launched a state-of-the-art digital revenue collection system aimed at streamlining payment processes and improving efficiency. The new system allows residents and businesses to pay their fees online, track their payment history, and receive instant receipts. This initiative is part of the county's broader digital transformation strategy to enhance service delivery and transparency. Governor Cecily Mbarire emphasized that the digital platform will reduce waiting times, eliminate manual processes, and provide real-time revenue tracking for better financial management.",
            "Technology",
            "County Communications",
            "2024-10-20",
            true,
            &["digital", "revenue", "technology", "innovation"],
        ),
        article(
            "news-public-participation-2024",
            "Public Participation on New Rates",
            "Stakeholders are invited for consultations on revised county rates.",
            "The County Government of Embu invites all stakeholders to participate in public consultations regarding the proposed revision of county rates and fees. The consultations will be held across all sub-counties to ensure maximum participation. The proposed changes aim to make rates more equitable while ensuring sustainable revenue generation for county development projects. Citizens can submit their views through physical meetings, online platforms, or written submissions. The Finance and Economic Planning department has committed to incorporating public feedback before finalizing the new rate structure.",
            "Public Notice",
            "Finance Department",
            "2024-10-10",
            false,
            &["rates", "public-participation", "consultation", "finance"],
        ),
        article(
            "news-healthcare-initiative-2024",
            "Governor Launches New Healthcare Initiative",
            "Embu County unveils ambitious healthcare program to improve service delivery",
            "Governor Cecily Mbarire has launched a comprehensive healthcare initiative aimed at improving medical services across all county facilities. The program includes equipment upgrades, staff training, and expanded outreach services. The initiative targets upgrading all Level 4 hospitals with modern diagnostic equipment, deploying mobile clinics to remote areas, and establishing a telemedicine platform for consultation services. Additionally, the county has allocated funds for recruiting additional healthcare workers and providing continuous professional development. The governor stated that quality healthcare is a fundamental right and this initiative will ensure accessible, affordable, and quality health services for all Embu residents.",
            "Health",
            "County Communications",
            "2024-10-15",
            true,
            &["health", "governor", "initiatives", "hospitals"],
        ),
        article(
            "news-road-infrastructure-2024",
            "Road Infrastructure Projects Underway",
            "50km of roads under construction across the county",
            "The county government has commenced construction of 50 kilometers of road network across various sub-counties. The projects are expected to improve accessibility and boost trade in rural areas. The Roads, Transport and Public Works department has engaged multiple contractors to ensure timely completion of the projects. Key routes include market access roads, farm-to-market connections, and urban street improvements. The infrastructure development is expected to reduce transportation costs, improve agricultural produce movement, and enhance emergency service delivery. Community leaders have welcomed the initiative as a major step towards opening up rural areas for economic development.",
            "Infrastructure",
            "Roads Department",
            "2024-10-05",
            false,
            &["roads", "infrastructure", "development", "construction"],
        ),
        article(
            "news-education-program-2024",
            "County Launches ECDE Excellence Program",
            "New initiative to improve Early Childhood Development Education standards",
            "Embu County has unveiled the ECDE Excellence Program aimed at transforming early childhood education across all sub-counties. The initiative includes constructing modern ECDE centers, training teachers, providing learning materials, and implementing a nutritious feeding program. The county will work with development partners to ensure every child has access to quality early education. The program also includes parental engagement sessions to promote holistic child development. Education Executive emphasized that investing in early childhood education creates a strong foundation for future academic success and overall child development.",
            "Education",
            "Education Department",
            "2024-09-28",
            true,
            &["education", "ECDE", "children", "development"],
        ),
        article(
            "news-revenue-collection-2024",
            "County Revenue Surpasses Quarterly Targets",
            "ECRA reports 15% increase in revenue collection for Q3 2024",
            "The Embu County Revenue Authority (ECRA) has announced that revenue collection for the third quarter of 2024 exceeded targets by 15%, marking the highest collection period in the county's history. The achievement is attributed to improved compliance, digital payment platforms, and enhanced enforcement mechanisms. Key revenue streams showing significant growth include Single Business Permits, parking fees, and land rates. ECRA Director credited the success to strategic partnerships with stakeholders, taxpayer education programs, and streamlined processes. The increased revenue will support critical development projects in health, education, infrastructure, and agriculture sectors across the county.",
            "Revenue",
            "ECRA",
            "2024-10-25",
            true,
            &["revenue", "ECRA", "finance", "achievement"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::test_utils::{init_test_tracing, sample_news};

    async fn store() -> ContentStore<NewsArticle, MemoryStorage> {
        init_test_tracing();
        ContentStore::open(MemoryStorage::new(), "embu_news").await
    }

    fn ids(articles: &[NewsArticle]) -> Vec<&str> {
        articles.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn test_defaults_match_default_ids() {
        let defaults = NewsArticle::defaults();
        assert_eq!(ids(&defaults), NewsArticle::DEFAULT_IDS);
        assert!(defaults.iter().all(|a| a.is_default && a.published_on().is_some()));
    }

    #[tokio::test]
    async fn test_recent_sorts_newest_first_with_limit() {
        let store = store().await;
        let recent = store.recent(Some(3));
        assert_eq!(
            ids(&recent),
            vec![
                "news-revenue-collection-2024",
                "news-digital-revenue-2024",
                "news-healthcare-initiative-2024",
            ]
        );
        assert_eq!(store.recent(None).len(), 6);
        assert_eq!(store.recent(Some(0)).len(), 6);
    }

    #[tokio::test]
    async fn test_featured_and_category_filters() {
        let store = store().await;
        assert_eq!(store.featured().len(), 4);
        assert_eq!(ids(&store.by_category("Health")), vec!["news-healthcare-initiative-2024"]);
        assert!(store.by_category("health").is_empty());
    }

    #[tokio::test]
    async fn test_custom_article_shows_up_first_and_in_recent() {
        let store = store().await;
        let mut custom = sample_news("news-custom");
        custom.publish_date = "2025-01-01".to_string();
        assert!(store.add(custom).await.is_applied());

        assert_eq!(store.current()[0].id, "news-custom");
        assert_eq!(store.recent(Some(1))[0].id, "news-custom");
    }
}
