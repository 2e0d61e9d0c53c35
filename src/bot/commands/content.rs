//! Read-only content commands - departments, news, tenders, downloads,
//! services, revenue and page search.
//!
//! Each command renders a snapshot of one content store as an embed. Listings
//! are cut to fit Discord's embed limits and the footer says how many entries
//! did not fit.

use crate::{
    core::{
        departments::Department,
        downloads::Download,
        news::NewsArticle,
        report::{excerpt, format_kes},
        services::CountyService,
        tenders::Tender,
    },
    errors::Result,
};
use std::fmt::Write;

/// Discord rejects embeds with more fields than this
const MAX_FIELDS: usize = 25;
/// Discord's cap on the combined text of one embed
const MAX_EMBED_CHARS: usize = 6000;
/// Left over for the title and footer
const RESERVED_CHARS: usize = 500;
/// Field names are capped at 256 by Discord, values at 1024
const MAX_NAME_CHARS: usize = 250;
const MAX_VALUE_CHARS: usize = 1000;
/// Longest summary shown per entry
const EXCERPT_CHARS: usize = 150;

/// Embed fields collected under Discord's size limits.
///
/// Once one entry does not fit, every later entry is counted as omitted so
/// the listing never skips over an entry.
#[derive(Debug, Default)]
struct EmbedFields {
    fields: Vec<(String, String, bool)>,
    chars: usize,
    omitted: usize,
}

impl EmbedFields {
    fn push(&mut self, name: &str, value: &str) {
        let name = excerpt(name, MAX_NAME_CHARS);
        let mut value = excerpt(value, MAX_VALUE_CHARS);
        if value.is_empty() {
            value.push('-');
        }

        let len = name.chars().count() + value.chars().count();
        if self.omitted > 0
            || self.fields.len() == MAX_FIELDS
            || self.chars + len > MAX_EMBED_CHARS - RESERVED_CHARS
        {
            self.omitted += 1;
            return;
        }

        self.chars += len;
        self.fields.push((name, value, false));
    }

    const fn omitted(&self) -> usize {
        self.omitted
    }

    fn into_fields(self) -> Vec<(String, String, bool)> {
        self.fields
    }
}

fn footer_text(site: &str, count: usize, noun: &str, omitted: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    let more = if omitted > 0 {
        format!(" | {omitted} more…")
    } else {
        String::new()
    };
    excerpt(&format!("{site} | {count} {noun}{plural}{more}"), MAX_NAME_CHARS)
}

fn department_field(dept: &Department) -> Result<(String, String)> {
    let mut value = String::new();
    writeln!(&mut value, "{}", excerpt(&dept.description, EXCERPT_CHARS))?;
    writeln!(&mut value, "**Revenue:** {}", format_kes(dept.total_revenue))?;
    let streams: Vec<&str> = dept
        .revenue_streams
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    if !streams.is_empty() {
        write!(&mut value, "**Streams:** {}", excerpt(&streams.join(", "), 300))?;
    }
    Ok((format!("{} {}", dept.icon, dept.display_name()), value))
}

fn news_field(article: &NewsArticle) -> (String, String) {
    let marker = if article.featured { "⭐ " } else { "" };
    (
        format!("{marker}{}", article.title),
        format!(
            "{}\n_{} | {} | {}_",
            excerpt(&article.summary, EXCERPT_CHARS),
            article.category,
            article.author,
            article.publish_date
        ),
    )
}

fn tender_field(tender: &Tender) -> (String, String) {
    (
        format!("{} [{}]", tender.title, tender.status),
        format!(
            "{}\n**Value:** {}\n**Closes:** {} | {}",
            excerpt(&tender.description, EXCERPT_CHARS),
            format_kes(tender.value),
            tender.closing_date,
            tender.category
        ),
    )
}

fn download_field(download: &Download) -> (String, String) {
    (
        download.title.clone(),
        format!(
            "{}\n{} {} | {} downloads | [{}]({})",
            excerpt(&download.description, EXCERPT_CHARS),
            download.file_type,
            download.file_size.as_deref().unwrap_or(""),
            download.download_count,
            download.category,
            download.file_url
        ),
    )
}

fn service_field(service: &CountyService) -> Result<(String, String)> {
    let mut value = format!("{}\n", excerpt(&service.description, EXCERPT_CHARS));
    for fee in &service.fees {
        let amount = if fee.amount > 0.0 {
            format_kes(Some(fee.amount))
        } else {
            "Varies".to_string()
        };
        match &fee.period {
            Some(period) => {
                writeln!(&mut value, "• {}: {amount} ({period})", fee.description)?;
            }
            None => writeln!(&mut value, "• {}: {amount}", fee.description)?,
        }
    }
    if service.digital_available {
        value.push_str("💻 Available online");
    }
    Ok((format!("{} {}", service.icon, service.title), value))
}

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use super::{
        EmbedFields, department_field, download_field, footer_text, news_field, service_field,
        tender_field,
    };
    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::{
            report::{self, excerpt, format_kes},
            site_search,
        },
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use std::fmt::Write;

    const COLOR: u32 = 0x0034_98DB;

    async fn send_listing(
        ctx: poise::Context<'_, BotData, Error>,
        title: &str,
        fields: EmbedFields,
        count: usize,
        noun: &str,
    ) -> Result<()> {
        let footer = footer_text(&ctx.data().config.site.name, count, noun, fields.omitted());
        let embed = serenity::CreateEmbed::default()
            .title(title)
            .color(COLOR)
            .fields(fields.into_fields())
            .footer(serenity::CreateEmbedFooter::new(footer));
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Lists every county department with its revenue.
    #[poise::command(slash_command, prefix_command)]
    pub async fn departments(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let departments = ctx.data().stores.departments.current();

        let mut fields = EmbedFields::default();
        for dept in departments.as_slice() {
            let (name, value) = department_field(dept)?;
            fields.push(&name, &value);
        }

        let count = departments.len();
        send_listing(ctx, "🏛️ County Departments", fields, count, "department").await
    }

    /// Shows the latest news, newest first.
    #[poise::command(slash_command, prefix_command)]
    pub async fn news(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Only show this category"]
        #[autocomplete = "autocomplete::autocomplete_news_category"]
        category: Option<String>,
    ) -> Result<()> {
        let store = &ctx.data().stores.news;
        let articles = match &category {
            Some(category) => store
                .recent(None)
                .into_iter()
                .filter(|article| &article.category == category)
                .take(10)
                .collect(),
            None => store.recent(Some(10)),
        };

        if articles.is_empty() {
            ctx.say("📰 No news articles found.").await?;
            return Ok(());
        }

        let mut fields = EmbedFields::default();
        for article in &articles {
            let (name, value) = news_field(article);
            fields.push(&name, &value);
        }

        send_listing(ctx, "📰 Latest News", fields, articles.len(), "article").await
    }

    /// Lists procurement tenders.
    #[poise::command(slash_command, prefix_command)]
    pub async fn tenders(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Only tenders still accepting bids (default: false)"] open_only: Option<
            bool,
        >,
    ) -> Result<()> {
        let store = &ctx.data().stores.tenders;
        let tenders = if open_only.unwrap_or(false) {
            store.open_tenders()
        } else {
            store.current().to_vec()
        };

        if tenders.is_empty() {
            ctx.say("📑 No tenders found.").await?;
            return Ok(());
        }

        let mut fields = EmbedFields::default();
        for tender in &tenders {
            let (name, value) = tender_field(tender);
            fields.push(&name, &value);
        }

        send_listing(ctx, "📑 Tenders", fields, tenders.len(), "tender").await
    }

    /// Lists downloadable forms and reports, newest first.
    #[poise::command(slash_command, prefix_command)]
    pub async fn downloads(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Only show this category"]
        #[autocomplete = "autocomplete::autocomplete_download_category"]
        category: Option<String>,
    ) -> Result<()> {
        let store = &ctx.data().stores.downloads;
        let downloads = match &category {
            Some(category) => store.by_category(category),
            None => store.recent_uploads(None),
        };

        if downloads.is_empty() {
            ctx.say("📥 No downloads found.").await?;
            return Ok(());
        }

        let mut fields = EmbedFields::default();
        for download in &downloads {
            let (name, value) = download_field(download);
            fields.push(&name, &value);
        }

        send_listing(ctx, "📥 Downloads", fields, downloads.len(), "document").await
    }

    /// Lists county services with their fees.
    #[poise::command(slash_command, prefix_command)]
    pub async fn services(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Only show this category"]
        #[autocomplete = "autocomplete::autocomplete_service_category"]
        category: Option<String>,
    ) -> Result<()> {
        let store = &ctx.data().stores.services;
        let services = match &category {
            Some(category) => store.by_category(category),
            None => store.current().to_vec(),
        };

        if services.is_empty() {
            ctx.say("🏛️ No services found.").await?;
            return Ok(());
        }

        let mut fields = EmbedFields::default();
        for service in &services {
            let (name, value) = service_field(service)?;
            fields.push(&name, &value);
        }

        send_listing(ctx, "🏛️ County Services", fields, services.len(), "service").await
    }

    /// Shows total county revenue and each department's share.
    #[poise::command(slash_command, prefix_command)]
    pub async fn revenue(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let store = &ctx.data().stores.departments;
        let shares = report::revenue_breakdown(&store.current());

        let mut description = format!("**Total:** {}\n\n", format_kes(Some(store.total_revenue())));
        for share in &shares {
            writeln!(
                &mut description,
                "{} **{}**: {}\n`{}`",
                share.icon,
                excerpt(&share.name, 100),
                format_kes(share.revenue),
                report::format_share_bar(share.percent, Some(15))
            )?;
        }

        let footer = footer_text(&ctx.data().config.site.name, shares.len(), "department", 0);
        let embed = serenity::CreateEmbed::default()
            .title("💰 County Revenue")
            .color(COLOR)
            .description(excerpt(&description, 4000))
            .footer(serenity::CreateEmbedFooter::new(footer));
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Finds portal pages by name.
    #[poise::command(slash_command, prefix_command)]
    pub async fn search(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Page name or part of it"] query: String,
    ) -> Result<()> {
        let pages = site_search::search_pages(&query);

        if pages.is_empty() {
            ctx.say(format!("🔍 No pages match '{}'.", excerpt(&query, 100)))
                .await?;
            return Ok(());
        }

        let mut response = String::from("🔍 **Matching pages**\n");
        for page in pages {
            writeln!(&mut response, "• {} - `{}`", page.name, page.path)?;
        }
        ctx.say(response).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::services::ServiceFee;
    use crate::test_utils::{sample_department, sample_service, sample_tender};

    fn total_chars(fields: &[(String, String, bool)]) -> usize {
        fields
            .iter()
            .map(|(name, value, _)| name.chars().count() + value.chars().count())
            .sum()
    }

    fn long_service(id: &str) -> CountyService {
        let mut service = sample_service(id);
        service.title = "Extended trading licence ".repeat(20);
        service.description = "Covers every premises category. ".repeat(40);
        service.fees = (0..30)
            .map(|i| ServiceFee {
                description: format!("Premises band {i} with additional signage charges"),
                amount: 12_500.0,
                period: Some("per annum".to_string()),
            })
            .collect();
        service
    }

    #[test]
    fn test_long_services_stay_within_embed_limits() {
        let mut fields = EmbedFields::default();
        for i in 0..25 {
            let (name, value) = service_field(&long_service(&format!("svc-{i}"))).unwrap();
            fields.push(&name, &value);
        }

        assert!(fields.omitted() > 0);
        let omitted = fields.omitted();
        let fields = fields.into_fields();
        assert_eq!(fields.len() + omitted, 25);
        assert!(total_chars(&fields) <= MAX_EMBED_CHARS - RESERVED_CHARS);
        for (name, value, _) in &fields {
            assert!(name.chars().count() <= 256);
            assert!(value.chars().count() <= 1024);
        }
    }

    #[test]
    fn test_long_titles_are_shortened() {
        let mut tender = sample_tender("tender-long");
        tender.title = "Road ".repeat(100);

        let mut fields = EmbedFields::default();
        let (name, value) = tender_field(&tender);
        fields.push(&name, &value);

        assert_eq!(fields.omitted(), 0);
        let fields = fields.into_fields();
        assert!(fields[0].0.chars().count() <= 256);
        assert!(fields[0].0.ends_with("..."));
    }

    #[test]
    fn test_field_count_is_capped() {
        let mut fields = EmbedFields::default();
        for i in 0..30 {
            let (name, value) = department_field(&sample_department(&format!("d{i}"))).unwrap();
            fields.push(&name, &value);
        }
        assert_eq!(fields.omitted(), 5);
        assert_eq!(fields.into_fields().len(), MAX_FIELDS);
    }

    #[test]
    fn test_empty_values_get_a_placeholder() {
        let mut fields = EmbedFields::default();
        fields.push("Name", "   ");
        assert_eq!(fields.into_fields()[0].1, "-");
    }

    #[test]
    fn test_footer_text() {
        assert_eq!(footer_text("Embu County", 1, "tender", 0), "Embu County | 1 tender");
        assert_eq!(
            footer_text("Embu County", 30, "service", 12),
            "Embu County | 30 services | 12 more…"
        );
    }
}
