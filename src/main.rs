use log::info;
use rusqlite::Connection;
use std::env;
use std::sync::Arc;
use teloxide::prelude::*;
use anyhow::Result;
use dotenv;

use glitchscan::bot::{self, BotDeps};
use glitchscan::config::BotConfig;
use glitchscan::content::{AirtableClient, AirtableConfig};
use glitchscan::cooldown::{CooldownGate, InMemoryTimerStore, ScanTimerStore};
use glitchscan::db::{self, SqliteTimerStore};
use glitchscan::localization::init_localization;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!("Starting Glitchscan Telegram Bot");

    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Load UI strings
    init_localization()?;

    // Get bot token from environment
    let bot_token = env::var("TELEGRAM_BOT_TOKEN").expect("TELEGRAM_BOT_TOKEN must be set");

    // Content store credentials
    let airtable = AirtableConfig::from_env()?;

    let config = BotConfig::from_env();

    // Scan timers live in SQLite when DATABASE_URL is set, in memory
    // otherwise
    let store: Box<dyn ScanTimerStore> = match env::var("DATABASE_URL") {
        Ok(database_url) => {
            info!("Initializing scan timer database at: {}", database_url);
            let conn = Connection::open(&database_url)?;
            db::init_database_schema(&conn)?;
            Box::new(SqliteTimerStore::new(conn))
        }
        Err(_) => {
            info!("DATABASE_URL not set, keeping scan timers in memory");
            Box::new(InMemoryTimerStore::new())
        }
    };

    let gate = CooldownGate::new(store, config.cooldown_window);

    let deps = Arc::new(BotDeps {
        config,
        gate,
        content: AirtableClient::new(airtable),
    });

    // Initialize the bot
    let bot = Bot::new(bot_token);

    info!("Bot initialized, starting dispatcher");

    // Set up the dispatcher with shared dependencies
    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint({
            let deps = Arc::clone(&deps);
            move |bot: Bot, msg: Message| {
                let deps = Arc::clone(&deps);
                async move { bot::message_handler(bot, msg, deps).await }
            }
        }))
        .branch(Update::filter_callback_query().endpoint({
            let deps = Arc::clone(&deps);
            move |bot: Bot, q: CallbackQuery| {
                let deps = Arc::clone(&deps);
                async move { bot::callback_handler(bot, q, deps).await }
            }
        }));

    Dispatcher::builder(bot, handler)
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
