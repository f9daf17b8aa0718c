//! Message Handler module for processing incoming Telegram messages

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::debug;

// Import localization
use crate::localization::t;

// Import navigation types
use crate::navigation::{Action, ENTRY_COMMAND};

// Import the shared dispatcher
use super::dispatcher::{dispatch_action, BotDeps};

async fn handle_text_message(bot: &Bot, msg: &Message, text: &str, deps: &BotDeps) -> Result<()> {
    debug!(user_id = %msg.chat.id, message_length = text.len(), "Received text message from user");

    if text == ENTRY_COMMAND {
        let user_id = msg
            .from
            .as_ref()
            .map(|user| user.id.0 as i64)
            .unwrap_or(msg.chat.id.0);

        return dispatch_action(bot, msg.chat.id, user_id, Action::EntryCommand, deps).await;
    }

    // Anything that is not the entry command just gets pointed at it
    bot.send_message(msg.chat.id, t("unknown-command")).await?;
    Ok(())
}

pub async fn message_handler(bot: Bot, msg: Message, deps: Arc<BotDeps>) -> Result<()> {
    if let Some(text) = msg.text() {
        handle_text_message(&bot, &msg, text, &deps).await?;
    } else {
        debug!(user_id = %msg.chat.id, "Ignoring non-text message");
    }

    Ok(())
}
