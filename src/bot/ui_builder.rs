//! UI Builder module for turning rendered messages into Telegram calls

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, InputFile};
use tracing::warn;
use url::Url;

// Import renderer types
use crate::render::{Button, ButtonAction, OutboundMessage};

/// Build an inline keyboard from rendered buttons, one button per row —
/// the layout every screen uses. Returns `None` for an empty button set so
/// callers skip the reply markup entirely.
pub fn build_keyboard(buttons: &[Button]) -> Option<InlineKeyboardMarkup> {
    if buttons.is_empty() {
        return None;
    }

    let mut rows = Vec::new();

    for button in buttons {
        match &button.action {
            ButtonAction::Callback(data) => {
                rows.push(vec![InlineKeyboardButton::callback(
                    button.label.clone(),
                    data.clone(),
                )]);
            }
            ButtonAction::Url(link) => match Url::parse(link) {
                Ok(link) => {
                    rows.push(vec![InlineKeyboardButton::url(button.label.clone(), link)]);
                }
                Err(e) => {
                    warn!(link = %link, error = %e, "Skipping button with unparseable URL");
                }
            },
        }
    }

    Some(InlineKeyboardMarkup::new(rows))
}

/// Deliver a rendered message to a chat.
///
/// A message carrying a usable photo URL goes out as a photo with the text
/// as caption; anything else goes out as plain text. The fallback applies
/// per message, so one screen missing its photo never affects another.
pub async fn deliver(bot: &Bot, chat_id: ChatId, message: &OutboundMessage) -> Result<()> {
    let keyboard = build_keyboard(&message.buttons);

    let photo = message.photo_url.as_deref().and_then(|raw| {
        Url::parse(raw)
            .map_err(|e| warn!(url = raw, error = %e, "Ignoring unparseable photo URL"))
            .ok()
    });

    match photo {
        Some(photo) => {
            let request = bot
                .send_photo(chat_id, InputFile::url(photo))
                .caption(message.text.clone());
            match keyboard {
                Some(keyboard) => request.reply_markup(keyboard).await?,
                None => request.await?,
            };
        }
        None => {
            let request = bot.send_message(chat_id, message.text.clone());
            match keyboard {
                Some(keyboard) => request.reply_markup(keyboard).await?,
                None => request.await?,
            };
        }
    }

    Ok(())
}
