//! Dispatcher module running one inbound action through the full flow:
//! cooldown gate (dispensing only), content fetch, render, delivery.

use anyhow::Result;
use chrono::Utc;
use teloxide::prelude::*;
use tracing::{debug, warn};

// Import the flow pieces
use crate::config::BotConfig;
use crate::content::{AirtableClient, ContentRecord};
use crate::cooldown::{hours_minutes, CooldownDecision, CooldownGate};
use crate::localization::t_args;
use crate::navigation::{follow_up, next_screen, required_category, Action};
use crate::render::render;

// Import UI builder functions
use super::ui_builder::deliver;

/// Shared handler dependencies, built once in `main` and cloned into the
/// dispatch tree behind an `Arc`
pub struct BotDeps {
    pub config: BotConfig,
    pub gate: CooldownGate,
    pub content: AirtableClient,
}

/// Run one user action through gate, fetch, render and delivery.
///
/// This is the single call site both handlers funnel into, so command and
/// button presses behave identically. Screen progression is derived from
/// the action alone; nothing per-user is stored besides the scan timer.
pub async fn dispatch_action(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    action: Action,
    deps: &BotDeps,
) -> Result<()> {
    if action.is_dispensing() {
        // Refuse unknown keys rather than passing stray callback data to
        // the content store.
        if let Action::SelectCategory(key) = &action {
            if !deps.config.is_known_category(key) {
                debug!(user_id, category = %key, "Ignoring scan request for unconfigured category");
                return Ok(());
            }
        }

        match deps.gate.check_and_record(user_id, Utc::now())? {
            CooldownDecision::Allowed => {
                debug!(user_id, "Scan allowed, timer recorded");
            }
            CooldownDecision::Denied { remaining } => {
                let (hours, minutes) = hours_minutes(remaining);
                debug!(user_id, hours, minutes, "Scan denied, cooldown active");
                bot.send_message(
                    chat_id,
                    t_args(
                        "cooldown-wait",
                        &[
                            ("hours", &hours.to_string()),
                            ("minutes", &minutes.to_string()),
                        ],
                    ),
                )
                .await?;
                return Ok(());
            }
        }
    }

    let screen = next_screen(&action);

    let record = match required_category(&action, &deps.config.default_category) {
        Some(category) => fetch_today(&deps.content, category).await,
        None => ContentRecord::default(),
    };

    deliver(bot, chat_id, &render(screen, &record, &deps.config)).await?;

    if let Some(follow) = follow_up(screen) {
        deliver(bot, chat_id, &render(follow, &record, &deps.config)).await?;
    }

    Ok(())
}

/// Fetch today's record for a category, degrading every failure to the
/// empty record so the renderer falls back to configured defaults.
async fn fetch_today(client: &AirtableClient, category: &str) -> ContentRecord {
    let today = Utc::now().date_naive();

    match client.fetch(category, today).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            debug!(category, "No content record for today, using defaults");
            ContentRecord::default()
        }
        Err(e) => {
            warn!(category, error = %e, "Content store lookup failed, using defaults");
            ContentRecord::default()
        }
    }
}
