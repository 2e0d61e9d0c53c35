//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Chatbot commands
pub mod chat;

/// Read-only content commands
pub mod content;

/// General utility commands
pub mod general;

/// Back-office commands
pub mod manage;

// Export commands
pub use chat::*;
pub use content::*;
pub use general::*;
pub use manage::*;

use crate::{bot::BotData, errors::Error};

/// Every top-level command the bot registers
#[must_use]
pub fn all() -> Vec<poise::Command<BotData, Error>> {
    vec![
        ping(),
        help(),
        departments(),
        news(),
        tenders(),
        downloads(),
        services(),
        search(),
        revenue(),
        manage(),
        ask(),
        quick(),
        chat_reset(),
    ]
}
