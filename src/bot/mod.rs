//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules for better organization:
//! - `message_handler`: Handles the /start entry command and stray text
//! - `callback_handler`: Handles inline keyboard callback queries
//! - `dispatcher`: Runs an action through gate, fetch, render and delivery
//! - `ui_builder`: Builds keyboards and sends photo-or-text messages

pub mod callback_handler;
pub mod dispatcher;
pub mod message_handler;
pub mod ui_builder;

// Re-export main handler functions for use in main.rs
pub use callback_handler::callback_handler;
pub use message_handler::message_handler;

// Re-export the shared dispatch pieces
pub use dispatcher::{dispatch_action, BotDeps};
pub use ui_builder::{build_keyboard, deliver};
