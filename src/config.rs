//! # Bot Configuration Module
//!
//! This module defines the configuration surface for the scanner bot:
//! the cooldown window, the scannable category list, and the fallback
//! strings used when the content store has no record for today.

use chrono::Duration;
use log::warn;
use std::env;

// Constants for bot configuration
pub const DEFAULT_COOLDOWN_HOURS: i64 = 16;
pub const DEFAULT_CATEGORY: &str = "Greece";
pub const DEFAULT_CATEGORIES: &str = "\u{1F1E6}\u{1F1F1} Albania=Albania,\u{1F1EC}\u{1F1F7} Greece=Greece";
pub const DEFAULT_MAIN_GROUP_URL: &str = "https://t.me/YourMainGroup";

/// One scannable category: the button label shown to the user and the
/// content-store lookup key behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    pub label: String,
    pub key: String,
}

/// Fallback strings used when a content field is missing or empty
#[derive(Debug, Clone)]
pub struct FieldDefaults {
    pub intro_text: String,
    pub after_start_text: String,
    pub main_text: String,
    pub scan_message: String,
    pub scan_final_text: String,
}

impl Default for FieldDefaults {
    fn default() -> Self {
        Self {
            intro_text: "Welcome to the bot!".to_string(),
            after_start_text: "Let's continue!".to_string(),
            main_text: "Here's your feed for today.".to_string(),
            scan_message: "Act fast before the glitch is gone.".to_string(),
            scan_final_text: "SCAN READY \u{2705}".to_string(),
        }
    }
}

/// Configuration structure for the scanner bot
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Minimum elapsed time between a user's successive scans
    pub cooldown_window: Duration,
    /// Category used for the intro/activation screens
    pub default_category: String,
    /// Scannable categories, in the order their buttons are shown
    pub categories: Vec<CategoryEntry>,
    /// Link behind the "Join Main Group" button
    pub main_group_url: String,
    /// Fallback strings for missing content fields
    pub defaults: FieldDefaults,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            cooldown_window: Duration::hours(DEFAULT_COOLDOWN_HOURS),
            default_category: DEFAULT_CATEGORY.to_string(),
            categories: parse_categories(DEFAULT_CATEGORIES),
            main_group_url: DEFAULT_MAIN_GROUP_URL.to_string(),
            defaults: FieldDefaults::default(),
        }
    }
}

impl BotConfig {
    /// Build a configuration from environment variables, falling back to
    /// the defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(raw) = env::var("SCAN_COOLDOWN_HOURS") {
            match raw.parse::<i64>() {
                Ok(hours) if hours > 0 => config.cooldown_window = Duration::hours(hours),
                _ => warn!("Ignoring invalid SCAN_COOLDOWN_HOURS value: {}", raw),
            }
        }

        if let Ok(category) = env::var("DEFAULT_CATEGORY") {
            if !category.trim().is_empty() {
                config.default_category = category.trim().to_string();
            }
        }

        if let Ok(raw) = env::var("SCAN_CATEGORIES") {
            let categories = parse_categories(&raw);
            if categories.is_empty() {
                warn!("Ignoring SCAN_CATEGORIES with no usable entries: {}", raw);
            } else {
                config.categories = categories;
            }
        }

        if let Ok(link) = env::var("MAIN_GROUP_URL") {
            if !link.trim().is_empty() {
                config.main_group_url = link.trim().to_string();
            }
        }

        config
    }

    /// Whether a category key is in the configured scannable list
    pub fn is_known_category(&self, key: &str) -> bool {
        self.categories.iter().any(|entry| entry.key == key)
    }
}

/// Parse an ordered category list from its `label=key,label=key` form.
/// Entries without a `=` use the same string as label and key.
pub fn parse_categories(raw: &str) -> Vec<CategoryEntry> {
    raw.split(',')
        .filter_map(|entry| {
            let entry = entry.trim();
            if entry.is_empty() {
                return None;
            }
            let (label, key) = match entry.split_once('=') {
                Some((label, key)) => (label.trim(), key.trim()),
                None => (entry, entry),
            };
            if label.is_empty() || key.is_empty() {
                return None;
            }
            Some(CategoryEntry {
                label: label.to_string(),
                key: key.to_string(),
            })
        })
        .collect()
}
