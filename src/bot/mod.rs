//! Bot layer - Discord-specific interface and command handlers
//!
//! This module exposes the portal through Discord: read commands over the
//! content stores, the `/manage` back office and per-user chatbot sessions.

/// Discord command implementations (content, manage, chat, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{
    config::AppConfig,
    core::{
        chatbot::{Chatbot, TypingDelay},
        stores::ContentStores,
    },
    errors::{Error, Result},
    storage::Backend,
};
use poise::serenity_prelude as serenity;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
pub struct BotData {
    /// Content stores backing every read and manage command
    pub stores: ContentStores<Backend>,
    /// Application settings
    pub config: AppConfig,
    chat_sessions: Mutex<HashMap<serenity::UserId, Chatbot>>,
}

impl BotData {
    /// Creates the bot context around already opened stores.
    #[must_use]
    pub fn new(stores: ContentStores<Backend>, config: AppConfig) -> Self {
        Self {
            stores,
            config,
            chat_sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Chatbot session of `user`, created and opened on first use.
    pub fn chat_session(&self, user: serenity::UserId) -> Chatbot {
        let mut sessions = self
            .chat_sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        sessions
            .entry(user)
            .or_insert_with(|| {
                let session = Chatbot::new(TypingDelay::from(&self.config.chatbot));
                session.open();
                session
            })
            .clone()
    }

    /// Forgets the chatbot session of `user`. Returns whether one existed.
    pub fn end_chat_session(&self, user: serenity::UserId) -> bool {
        self.chat_sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&user)
            .is_some()
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {error}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {error}", ctx.command().name);
            if let Err(e) = ctx.say(format!("❌ An error occurred: {error}")).await {
                error!("Failed to send error message: {e}");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {e}");
            }
        }
    }
}

/// Connects to Discord and serves commands until the client stops.
#[instrument(skip(token, data))]
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {e}"))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {e}"))?;
    Ok(())
}
