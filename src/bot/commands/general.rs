//! General Discord commands - ping, help, and other utility commands.
//! This module contains simple commands that don't touch the content stores.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let site = &ctx.data().config.site.name;
        let help_text = format!(
            "**{site} Portal Help**\n\
        Here is a summary of all available commands.\n\n\
        **Browse**\n\
        • `/departments` - Lists county departments and their revenue.\n\
        • `/news [category]` - Shows the latest news.\n\
        • `/tenders [open_only]` - Lists procurement tenders.\n\
        • `/downloads [category]` - Lists forms and reports.\n\
        • `/services [category]` - Lists county services and fees.\n\
        • `/revenue` - Shows the revenue breakdown per department.\n\
        • `/search <query>` - Finds a portal page.\n\n\
        **Help Desk**\n\
        • `/ask <question>` - Asks the help-desk assistant.\n\
        • `/quick <action>` - Picks one of the suggested follow-ups.\n\
        • `/chat_reset` - Starts a fresh conversation.\n\n\
        **Management** (Manage Server permission)\n\
        • `/manage <subcommand>` - Add, delete or reset portal content.\n\n\
        **Utility**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message."
        );

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
