//! Back-office commands - add, update, delete and reset portal content.
//!
//! Built-in entries are protected by the stores themselves; these commands only
//! translate Discord input into store mutations and report the outcome.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::{
            departments::{Department, RevenueStream},
            downloads::Download,
            news::NewsArticle,
            services::{CountyService, ServiceFee},
            store::{MutationOutcome, parse_date, slug_id, timestamped_id},
            stores::ContentKind,
            tenders::{Tender, TenderStatus},
        },
        errors::{Error, Result},
    };
    use std::fmt::Write;

    fn today() -> String {
        chrono::Local::now().format("%Y-%m-%d").to_string()
    }

    async fn reply(ctx: poise::Context<'_, BotData, Error>, text: String) -> Result<()> {
        ctx.send(poise::CreateReply::default().content(text).ephemeral(true))
            .await?;
        Ok(())
    }

    async fn report_outcome(
        ctx: poise::Context<'_, BotData, Error>,
        outcome: MutationOutcome,
        success: String,
    ) -> Result<()> {
        match outcome {
            MutationOutcome::Applied => reply(ctx, format!("✅ {success}")).await,
            MutationOutcome::Rejected(rejection) => reply(ctx, format!("❌ {rejection}")).await,
        }
    }

    fn valid_amount(amount: Option<f64>) -> bool {
        amount.is_none_or(|a| a.is_finite() && a >= 0.0)
    }

    /// Parent command for managing portal content.
    #[poise::command(
        slash_command,
        required_permissions = "MANAGE_GUILD",
        default_member_permissions = "MANAGE_GUILD",
        subcommands(
            "add_news",
            "add_tender",
            "tender_status",
            "add_download",
            "add_department",
            "add_service",
            "delete",
            "reset",
            "summary"
        )
    )]
    pub async fn manage(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let response_text = "Welcome to the content back office!\n\
                             Available subcommands:\n\
                             - `add_news`, `add_tender`, `add_download`, `add_department`, `add_service`: publish new content.\n\
                             - `tender_status`: move a custom tender to open, closed or awarded.\n\
                             - `delete <kind> <id>`: remove a custom entry.\n\
                             - `reset <kind>`: drop every custom entry of a kind.\n\
                             - `summary`: entry counts per kind.\n\
                             Built-in entries cannot be changed or removed.";

        reply(ctx, response_text.to_string()).await
    }

    /// Publishes a news article.
    #[poise::command(slash_command)]
    pub async fn add_news(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Headline"] title: String,
        #[description = "One-line teaser"] summary: String,
        #[description = "Article body"] content: String,
        #[description = "Category (e.g., 'Health')"]
        #[autocomplete = "autocomplete::autocomplete_news_category"]
        category: String,
        #[description = "Byline (default: County Communications)"] author: Option<String>,
        #[description = "Show in the featured strip? (default: false)"] featured: Option<bool>,
    ) -> Result<()> {
        let article = NewsArticle {
            id: timestamped_id("news"),
            title: title.clone(),
            content,
            summary,
            category,
            author: author.unwrap_or_else(|| "County Communications".to_string()),
            publish_date: today(),
            image_url: None,
            featured: featured.unwrap_or(false),
            tags: Vec::new(),
            is_default: false,
        };
        let id = article.id.clone();

        let outcome = ctx.data().stores.news.add(article).await;
        report_outcome(ctx, outcome, format!("Published **{title}** (`{id}`)")).await
    }

    /// Advertises a new open tender.
    #[poise::command(slash_command)]
    pub async fn add_tender(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Tender title"] title: String,
        #[description = "Scope of work"] description: String,
        #[description = "Category (e.g., 'Infrastructure')"] category: String,
        #[description = "Closing date (YYYY-MM-DD)"] closing_date: String,
        #[description = "Estimated value in KES"] value: Option<f64>,
        #[description = "Opening date (YYYY-MM-DD, default: today)"] opening_date: Option<String>,
    ) -> Result<()> {
        let opening_date = opening_date.unwrap_or_else(today);
        if parse_date(&closing_date).is_none() || parse_date(&opening_date).is_none() {
            return reply(ctx, "❌ Dates must be in YYYY-MM-DD format.".to_string()).await;
        }
        if !valid_amount(value) {
            return reply(ctx, "❌ Value must be a non-negative number.".to_string()).await;
        }

        let tender = Tender {
            id: timestamped_id("tender"),
            title: title.clone(),
            description,
            category,
            opening_date,
            closing_date,
            status: TenderStatus::Open,
            value,
            document_url: None,
            is_default: false,
        };
        let id = tender.id.clone();

        let outcome = ctx.data().stores.tenders.add(tender).await;
        report_outcome(ctx, outcome, format!("Advertised tender **{title}** (`{id}`)")).await
    }

    /// Changes the status of a custom tender.
    #[poise::command(slash_command)]
    pub async fn tender_status(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Tender id"]
        #[autocomplete = "autocomplete::autocomplete_custom_tender"]
        id: String,
        #[description = "New status"]
        #[autocomplete = "autocomplete::autocomplete_tender_status"]
        status: String,
    ) -> Result<()> {
        let Some(status) = TenderStatus::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(status.trim()))
        else {
            return reply(
                ctx,
                format!("❌ Unknown status '{status}'. Use open, closed or awarded."),
            )
            .await;
        };

        let store = &ctx.data().stores.tenders;
        let Some(mut tender) = store.by_id(&id) else {
            return reply(ctx, format!("❌ Tender '{id}' not found.")).await;
        };
        tender.status = status;

        let outcome = store.update(&id, tender).await;
        report_outcome(ctx, outcome, format!("Tender `{id}` is now **{status}**")).await
    }

    /// Publishes a downloadable document.
    #[poise::command(slash_command)]
    pub async fn add_download(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Document title"] title: String,
        #[description = "What the document is for"] description: String,
        #[description = "Category (e.g., 'Forms')"]
        #[autocomplete = "autocomplete::autocomplete_download_category"]
        category: String,
        #[description = "Link to the file"] file_url: String,
        #[description = "File format (default: PDF)"] file_type: Option<String>,
        #[description = "Human-readable size (e.g., '2.5 MB')"] file_size: Option<String>,
    ) -> Result<()> {
        let download = Download {
            id: timestamped_id("download"),
            title: title.clone(),
            description,
            category,
            file_type: file_type.unwrap_or_else(|| "PDF".to_string()),
            file_size,
            file_url,
            upload_date: today(),
            download_count: 0,
            is_default: false,
        };
        let id = download.id.clone();

        let outcome = ctx.data().stores.downloads.add(download).await;
        report_outcome(ctx, outcome, format!("Published **{title}** (`{id}`)")).await
    }

    /// Adds a department.
    #[poise::command(slash_command)]
    pub async fn add_department(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Full department name"] name: String,
        #[description = "What the department does"] description: String,
        #[description = "Annual revenue in KES"] total_revenue: Option<f64>,
        #[description = "Comma-separated revenue streams"] revenue_streams: Option<String>,
        #[description = "Emoji (default: 🏛️)"] icon: Option<String>,
    ) -> Result<()> {
        if !valid_amount(total_revenue) {
            return reply(ctx, "❌ Revenue must be a non-negative number.".to_string()).await;
        }

        let streams = revenue_streams
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| RevenueStream {
                name: s.to_string(),
                description: None,
            })
            .collect();

        let department = Department {
            id: slug_id(&name),
            name: name.clone(),
            short_name: None,
            icon: icon.unwrap_or_else(|| "🏛️".to_string()),
            description,
            revenue_streams: streams,
            total_revenue,
            is_default: false,
        };
        let id = department.id.clone();

        let outcome = ctx.data().stores.departments.add(department).await;
        report_outcome(ctx, outcome, format!("Added department **{name}** (`{id}`)")).await
    }

    /// Adds a citizen service.
    #[poise::command(slash_command)]
    pub async fn add_service(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Service name"] title: String,
        #[description = "What the service is"] description: String,
        #[description = "Category id (e.g., 'business')"]
        #[autocomplete = "autocomplete::autocomplete_service_category"]
        category: String,
        #[description = "Fee line description"] fee_description: Option<String>,
        #[description = "Fee amount in KES"] fee_amount: Option<f64>,
        #[description = "Can be completed online? (default: false)"] digital_available: Option<
            bool,
        >,
        #[description = "Emoji (default: 📋)"] icon: Option<String>,
    ) -> Result<()> {
        if !valid_amount(fee_amount) {
            return reply(ctx, "❌ Fee must be a non-negative number.".to_string()).await;
        }

        let fees = match (fee_description, fee_amount) {
            (None, None) => Vec::new(),
            (description, amount) => vec![ServiceFee {
                description: description.unwrap_or_else(|| "Service fee".to_string()),
                amount: amount.unwrap_or(0.0),
                period: None,
            }],
        };

        let service = CountyService {
            id: timestamped_id("service"),
            title: title.clone(),
            description,
            category,
            icon: icon.unwrap_or_else(|| "📋".to_string()),
            fees,
            requirements: Vec::new(),
            processing_time: None,
            location: Vec::new(),
            digital_available: digital_available.unwrap_or(false),
            featured: false,
            contact_info: None,
            is_default: false,
        };
        let id = service.id.clone();

        let outcome = ctx.data().stores.services.add(service).await;
        report_outcome(ctx, outcome, format!("Added service **{title}** (`{id}`)")).await
    }

    /// Removes a custom entry.
    #[poise::command(slash_command)]
    pub async fn delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Content kind"]
        #[autocomplete = "autocomplete::autocomplete_content_kind"]
        kind: String,
        #[description = "Entry id"]
        #[autocomplete = "autocomplete::autocomplete_custom_id"]
        id: String,
    ) -> Result<()> {
        let Some(kind) = ContentKind::from_name(&kind) else {
            return reply(ctx, format!("❌ Unknown content kind '{kind}'.")).await;
        };

        let outcome = ctx.data().stores.delete(kind, id.trim()).await;
        report_outcome(ctx, outcome, format!("Deleted `{}` from {kind}", id.trim())).await
    }

    /// Drops every custom entry of one kind.
    #[poise::command(slash_command)]
    pub async fn reset(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Content kind"]
        #[autocomplete = "autocomplete::autocomplete_content_kind"]
        kind: String,
    ) -> Result<()> {
        let Some(kind) = ContentKind::from_name(&kind) else {
            return reply(ctx, format!("❌ Unknown content kind '{kind}'.")).await;
        };

        ctx.data().stores.reset(kind).await;
        reply(ctx, format!("✅ {kind} reset to the built-in entries.")).await
    }

    /// Shows entry counts per content kind.
    #[poise::command(slash_command)]
    pub async fn summary(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let mut response = String::from("📊 **Portal Content**\n");
        for line in ctx.data().stores.summary() {
            writeln!(
                &mut response,
                "• {}: {} entries ({} custom)",
                line.kind, line.total, line.custom
            )?;
        }
        reply(ctx, response).await
    }
}

// Re-export all commands
pub use inner::*;
