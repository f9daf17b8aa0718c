//! Callback Handler module for processing inline keyboard callback queries

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::RequestError;
use tracing::debug;

// Import navigation types
use crate::navigation::Action;

// Import the shared dispatcher
use super::dispatcher::{dispatch_action, BotDeps};

/// Acknowledge a callback query.
///
/// Telegram rejects acknowledgements for expired button presses; that
/// rejection is swallowed here, the single shared call site, and the
/// screen is still rendered. Transport-level failures propagate.
async fn acknowledge(bot: &Bot, q: &teloxide::types::CallbackQuery) -> Result<()> {
    match bot.answer_callback_query(q.id.clone()).await {
        Ok(_) => Ok(()),
        Err(RequestError::Api(e)) => {
            debug!(user_id = %q.from.id, error = %e, "Stale callback acknowledgement rejected, continuing");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Handle callback queries from inline keyboards
pub async fn callback_handler(
    bot: Bot,
    q: teloxide::types::CallbackQuery,
    deps: Arc<BotDeps>,
) -> Result<()> {
    debug!(user_id = %q.from.id, data = ?q.data, "Received callback query from user");

    acknowledge(&bot, &q).await?;

    let action = match q.data.as_deref().and_then(Action::parse) {
        Some(action) => action,
        None => {
            debug!(user_id = %q.from.id, "Ignoring callback query with unknown data");
            return Ok(());
        }
    };

    // Old buttons keep working: the message the button hangs off may be
    // gone, in which case the user's private chat is the destination.
    let chat_id = q
        .message
        .as_ref()
        .map(|msg| msg.chat().id)
        .unwrap_or(ChatId(q.from.id.0 as i64));

    dispatch_action(&bot, chat_id, q.from.id.0 as i64, action, &deps).await
}
