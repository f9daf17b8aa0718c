//! # Content Store Client Module
//!
//! Airtable client for the day's marketing content. Records are looked up
//! by (category, date) with an exact-date filter; the date is always today
//! in UTC. A record that cannot be fetched is treated as absent, never as
//! a user-visible error.

use anyhow::Context;
use chrono::NaiveDate;
use serde::Deserialize;
use std::env;
use std::time::Duration;
use tracing::debug;

/// Content field names as they appear in the Airtable table
pub mod fields {
    pub const PHOTO: &str = "Photo";
    pub const INTRO_TEXT: &str = "intro_text";
    pub const AFTER_START_TEXT: &str = "after_start_text";
    pub const MAIN_TEXT: &str = "main_text";
    pub const SCAN_MESSAGE: &str = "scan_message";
    pub const SCAN_FINAL_TEXT: &str = "scan_final_text";
}

const AIRTABLE_API_BASE: &str = "https://api.airtable.com/v0";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Errors from the content store
#[derive(Debug, Clone)]
pub enum StoreError {
    /// Network-level failure reaching Airtable
    Http(String),
    /// Airtable rejected the request (bad credentials, unknown table, ...)
    Api(String),
    /// Response body did not match the expected shape
    Decode(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Http(msg) => write!(f, "HTTP error: {msg}"),
            StoreError::Api(msg) => write!(f, "API error: {msg}"),
            StoreError::Decode(msg) => write!(f, "Decode error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// The `fields` object of one Airtable record.
///
/// Field presence is never guaranteed; accessors take the caller's default
/// or return `None`. The default (empty) record renders every screen from
/// configured fallback strings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ContentRecord {
    #[serde(flatten)]
    fields: serde_json::Map<String, serde_json::Value>,
}

impl ContentRecord {
    /// A named text field, if present and non-empty
    pub fn text(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .and_then(serde_json::Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    /// A named text field, or the given fallback
    pub fn text_or(&self, field: &str, default: &str) -> String {
        self.text(field).unwrap_or(default).to_string()
    }

    /// URL of the first attachment in a named media field, if any
    pub fn photo_url(&self, field: &str) -> Option<String> {
        self.fields
            .get(field)?
            .as_array()?
            .first()?
            .get("url")?
            .as_str()
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct RecordList {
    #[serde(default)]
    records: Vec<RawRecord>,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    fields: ContentRecord,
}

/// Airtable's date literal format: month/day/year without leading zeros
pub fn airtable_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// Exact-match filter for one category on one calendar date
pub fn filter_formula(category: &str, date: NaiveDate) -> String {
    // Category keys come from configuration, but escape quotes anyway so a
    // key like "Côte d'Ivoire" cannot break the formula.
    let escaped = category.replace('\'', "\\'");
    format!(
        "AND(country='{}', date=DATETIME_PARSE('{}', 'M/D/YYYY'))",
        escaped,
        airtable_date(date)
    )
}

/// Airtable credentials and table coordinates
#[derive(Debug, Clone)]
pub struct AirtableConfig {
    pub api_key: String,
    pub base_id: String,
    pub table_name: String,
    /// Overridable for tests; defaults to the public Airtable API
    pub api_base: String,
}

impl AirtableConfig {
    pub fn new(api_key: String, base_id: String, table_name: String) -> Self {
        Self {
            api_key,
            base_id,
            table_name,
            api_base: AIRTABLE_API_BASE.to_string(),
        }
    }

    /// Read credentials from `AIRTABLE_API_KEY`, `AIRTABLE_BASE_ID` and
    /// `AIRTABLE_TABLE_NAME`
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self::new(
            env::var("AIRTABLE_API_KEY").context("AIRTABLE_API_KEY must be set")?,
            env::var("AIRTABLE_BASE_ID").context("AIRTABLE_BASE_ID must be set")?,
            env::var("AIRTABLE_TABLE_NAME").context("AIRTABLE_TABLE_NAME must be set")?,
        ))
    }
}

/// HTTP client for the content store
pub struct AirtableClient {
    http: reqwest::Client,
    config: AirtableConfig,
}

impl AirtableClient {
    pub fn new(config: AirtableConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Fetch the content record for a category on a given date.
    ///
    /// Returns `Ok(None)` when no record matches; a request timeout is
    /// treated the same way. Other failures surface as [`StoreError`] for
    /// the caller to recover from.
    pub async fn fetch(
        &self,
        category: &str,
        date: NaiveDate,
    ) -> Result<Option<ContentRecord>, StoreError> {
        let url = format!(
            "{}/{}/{}",
            self.config.api_base, self.config.base_id, self.config.table_name
        );

        let response = match self
            .http
            .get(&url)
            .bearer_auth(&self.config.api_key)
            .query(&[("filterByFormula", filter_formula(category, date))])
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                debug!(category, "Content store request timed out, treating as not found");
                return Ok(None);
            }
            Err(e) => return Err(StoreError::Http(e.to_string())),
        };

        let response = response
            .error_for_status()
            .map_err(|e| StoreError::Api(e.to_string()))?;

        let list: RecordList = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        Ok(list.records.into_iter().next().map(|record| record.fields))
    }
}
