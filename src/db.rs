use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::info;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Mutex;

use crate::cooldown::ScanTimerStore;

/// Initialize the database schema
pub fn init_database_schema(conn: &Connection) -> Result<()> {
    info!("Initializing database schema...");

    // Create scan timer table
    conn.execute(
        "CREATE TABLE IF NOT EXISTS scan_times (
            telegram_id INTEGER PRIMARY KEY,
            last_scan_at TEXT NOT NULL
        )",
        [],
    )
    .context("Failed to create scan_times table")?;

    info!("Database schema initialized successfully");
    Ok(())
}

/// Durable [`ScanTimerStore`] backed by SQLite, for deployments that want
/// cooldowns to survive a restart. Timestamps are stored as RFC 3339 text.
pub struct SqliteTimerStore {
    conn: Mutex<Connection>,
}

impl SqliteTimerStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

impl ScanTimerStore for SqliteTimerStore {
    fn last_scan(&self, user_id: i64) -> Result<Option<DateTime<Utc>>> {
        let conn = self.conn.lock().unwrap();

        let raw: Option<String> = conn
            .query_row(
                "SELECT last_scan_at FROM scan_times WHERE telegram_id = ?1",
                params![user_id],
                |row| row.get(0),
            )
            .optional()
            .context("Failed to read last scan time")?;

        match raw {
            Some(value) => {
                let parsed = DateTime::parse_from_rfc3339(&value)
                    .with_context(|| format!("Invalid stored scan time: {}", value))?;
                Ok(Some(parsed.with_timezone(&Utc)))
            }
            None => Ok(None),
        }
    }

    fn record_scan(&self, user_id: i64, at: DateTime<Utc>) -> Result<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "INSERT INTO scan_times (telegram_id, last_scan_at) VALUES (?1, ?2)
             ON CONFLICT(telegram_id) DO UPDATE SET last_scan_at = excluded.last_scan_at",
            params![user_id, at.to_rfc3339()],
        )
        .context("Failed to record scan time")?;

        Ok(())
    }
}
