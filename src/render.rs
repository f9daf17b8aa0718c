//! # Renderer Module
//!
//! Pure mapping from (screen, content record, config) to the outbound
//! message: text or photo-with-caption plus an ordered button set. All
//! Telegram specifics stay in the bot module; this one only shapes data.

use crate::config::BotConfig;
use crate::content::{fields, ContentRecord};
use crate::localization::t;
use crate::navigation::{callback, Screen};

/// What pressing a button does: fire a callback or open a link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    Callback(String),
    Url(String),
}

/// One inline button: label shown to the user plus its action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub action: ButtonAction,
}

impl Button {
    fn callback(label: String, data: impl Into<String>) -> Self {
        Self {
            label,
            action: ButtonAction::Callback(data.into()),
        }
    }

    fn url(label: String, link: impl Into<String>) -> Self {
        Self {
            label,
            action: ButtonAction::Url(link.into()),
        }
    }
}

/// A fully rendered message, ready for the platform adapter to deliver.
/// With a `photo_url` present the text becomes the photo caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub text: String,
    pub photo_url: Option<String>,
    pub buttons: Vec<Button>,
}

/// Render a screen from the fetched content record.
///
/// Deterministic in its inputs: the same (screen, record, config) always
/// yields the same message. Missing text fields fall back to the
/// configured defaults; a missing or empty photo field turns the message
/// into plain text, independently for every screen that carries media.
pub fn render(screen: Screen, record: &ContentRecord, config: &BotConfig) -> OutboundMessage {
    let defaults = &config.defaults;

    match screen {
        Screen::Intro => OutboundMessage {
            text: record.text_or(fields::INTRO_TEXT, &defaults.intro_text),
            photo_url: record.photo_url(fields::PHOTO),
            buttons: vec![Button::callback(t("start-button"), callback::START_TAP)],
        },
        Screen::PostIntro => OutboundMessage {
            text: record.text_or(fields::AFTER_START_TEXT, &defaults.after_start_text),
            photo_url: None,
            buttons: vec![
                Button::url(t("join-group-button"), config.main_group_url.clone()),
                Button::callback(t("activate-ai-button"), callback::ACTIVATE),
            ],
        },
        Screen::AiActivated => OutboundMessage {
            text: record.text_or(fields::MAIN_TEXT, &defaults.main_text),
            photo_url: record.photo_url(fields::PHOTO),
            buttons: vec![Button::callback(t("connect-button"), callback::CONNECT)],
        },
        Screen::CountrySelect => OutboundMessage {
            text: t("country-select-prompt"),
            photo_url: None,
            buttons: config
                .categories
                .iter()
                .map(|entry| {
                    Button::callback(
                        entry.label.clone(),
                        format!("{}{}", callback::SCAN_PREFIX, entry.key),
                    )
                })
                .collect(),
        },
        Screen::ScanResult => OutboundMessage {
            text: format!(
                "{}\n\n{}",
                record.text_or(fields::SCAN_MESSAGE, &defaults.scan_message),
                record.text_or(fields::SCAN_FINAL_TEXT, &defaults.scan_final_text)
            ),
            photo_url: None,
            buttons: Vec::new(),
        },
        Screen::ScanAgainPrompt => OutboundMessage {
            text: t("rescan-prompt"),
            photo_url: None,
            buttons: vec![Button::callback(t("scan-again-button"), callback::RESCAN)],
        },
    }
}
