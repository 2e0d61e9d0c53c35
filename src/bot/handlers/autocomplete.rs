//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggestions come from the live content stores and the caller's chatbot
//! session, so they always match what the commands will accept.

use crate::{
    bot::BotData,
    core::{
        chatbot::QuickAction,
        store::{ContentEntity, ContentStore},
        stores::ContentKind,
        tenders::TenderStatus,
    },
    errors::Error,
    storage::Backend,
};
use std::collections::BTreeSet;

/// Discord shows at most this many suggestions
const MAX_CHOICES: usize = 25;

fn matching<I>(candidates: I, partial: &str) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let partial_lower = partial.to_lowercase();
    candidates
        .into_iter()
        .filter(|candidate| candidate.to_lowercase().contains(&partial_lower))
        .take(MAX_CHOICES)
        .collect()
}

fn categories<E, F>(store: &ContentStore<E, Backend>, category: F) -> BTreeSet<String>
where
    E: ContentEntity,
    F: Fn(&E) -> &str,
{
    store
        .current()
        .iter()
        .map(|entry| category(entry).to_string())
        .collect()
}

/// Suggests news categories currently in use.
pub async fn autocomplete_news_category(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let found = categories(&ctx.data().stores.news, |article| article.category.as_str());
    matching(found, partial)
}

/// Suggests download categories currently in use.
pub async fn autocomplete_download_category(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let found = categories(&ctx.data().stores.downloads, |download| download.category.as_str());
    matching(found, partial)
}

/// Suggests service categories currently in use.
pub async fn autocomplete_service_category(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let found = categories(&ctx.data().stores.services, |service| service.category.as_str());
    matching(found, partial)
}

/// Suggests content kind names.
pub async fn autocomplete_content_kind(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    matching(ContentKind::ALL.map(|kind| kind.label().to_string()), partial)
}

/// Suggests tender statuses.
pub async fn autocomplete_tender_status(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    matching(TenderStatus::ALL.map(|status| status.as_str().to_string()), partial)
}

/// Suggests ids of custom entries of every kind. Built-in entries cannot be
/// changed, so they are never offered.
pub async fn autocomplete_custom_id(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let stores = &ctx.data().stores;
    let ids = ContentKind::ALL
        .into_iter()
        .flat_map(|kind| stores.custom_ids(kind));
    matching(ids, partial)
}

/// Suggests ids of custom tenders.
pub async fn autocomplete_custom_tender(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    matching(ctx.data().stores.custom_ids(ContentKind::Tenders), partial)
}

/// Suggests the quick actions the caller's chatbot session is offering.
pub async fn autocomplete_quick_action(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let session = ctx.data().chat_session(ctx.author().id);
    quick_action_choices(session.quick_actions(), partial)
}

fn quick_action_choices(actions: &[QuickAction], partial: &str) -> Vec<String> {
    matching(actions.iter().map(|action| action.label.to_string()), partial)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chatbot::Topic;

    #[test]
    fn test_matching_is_case_insensitive_and_capped() {
        let many = (0..40).map(|i| format!("Item {i}"));
        assert_eq!(matching(many, "item").len(), MAX_CHOICES);

        let names = vec!["Forms".to_string(), "Reports".to_string()];
        assert_eq!(matching(names, "FOR"), vec!["Forms"]);
    }

    #[test]
    fn test_quick_action_choices_use_labels() {
        let actions = Topic::Greetings.response().quick_actions;
        assert_eq!(
            quick_action_choices(actions, "pay"),
            vec!["Payment Options".to_string()]
        );
        assert_eq!(quick_action_choices(actions, "").len(), actions.len());
    }
}
