//! Help-desk chatbot commands.
//!
//! Every user gets their own session. `/ask` sends free text, `/quick` picks
//! one of the follow-ups the last reply offered.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::chatbot::Chatbot,
        errors::{Error, Result},
    };
    use std::fmt::Write;
    use tokio::task::JoinHandle;
    use tracing::warn;

    /// Waits for the pending reply and posts it with the follow-ups it offers.
    async fn deliver(
        ctx: poise::Context<'_, BotData, Error>,
        session: &Chatbot,
        pending: Option<JoinHandle<()>>,
    ) -> Result<()> {
        let Some(pending) = pending else {
            ctx.say("⏳ Still answering your previous question, try again in a moment.")
                .await?;
            return Ok(());
        };

        ctx.defer().await?;
        if let Err(e) = pending.await {
            warn!("Chatbot reply task failed: {e}");
        }

        let Some(reply) = session.last_reply() else {
            return Ok(());
        };
        let mut response = reply.text;
        let actions = session.quick_actions();
        if !actions.is_empty() {
            response.push_str("\n\n**Quick actions** (use `/quick`):");
            for action in actions {
                write!(&mut response, "\n{} {}", action.icon, action.label)?;
            }
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Asks the help-desk assistant a question.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ask(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Your question"] question: String,
    ) -> Result<()> {
        if question.trim().is_empty() {
            ctx.say("❌ Please type a question.").await?;
            return Ok(());
        }

        let session = ctx.data().chat_session(ctx.author().id);
        let pending = session.submit_text(&question);
        deliver(ctx, &session, pending).await
    }

    /// Picks one of the assistant's suggested follow-ups.
    #[poise::command(slash_command, prefix_command)]
    pub async fn quick(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Suggested follow-up"]
        #[autocomplete = "autocomplete::autocomplete_quick_action"]
        action: String,
    ) -> Result<()> {
        let session = ctx.data().chat_session(ctx.author().id);
        let choice = action.trim();
        let Some(picked) = session
            .quick_actions()
            .iter()
            .find(|a| a.label.eq_ignore_ascii_case(choice) || a.id.eq_ignore_ascii_case(choice))
        else {
            ctx.say(format!(
                "❌ '{choice}' is not one of the current suggestions. Use `/ask` instead."
            ))
            .await?;
            return Ok(());
        };

        let pending = session.submit_quick_action(picked.id, picked.label);
        deliver(ctx, &session, pending).await
    }

    /// Forgets your conversation with the assistant.
    #[poise::command(slash_command, prefix_command)]
    pub async fn chat_reset(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let message = if ctx.data().end_chat_session(ctx.author().id) {
            "🔄 Conversation cleared. Use `/ask` to start again."
        } else {
            "ℹ️ You have no conversation to clear."
        };
        ctx.say(message).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
