//! # Cooldown Gate Module
//!
//! This module enforces the per-user scan cooldown. Each user may trigger
//! one content-dispensing scan per cooldown window; further attempts are
//! denied with the remaining wait time.
//!
//! # State Machine
//!
//! - **No timer recorded**: first scan, always allowed
//! - **Timer older than the window**: allowed, timer re-recorded
//! - **Timer inside the window**: denied, timer untouched
//!
//! The timer store is injected behind [`ScanTimerStore`] so the in-memory
//! map can be swapped for a durable backend without touching gate logic.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

/// Per-user scan timer store
///
/// One `last_scan_at` timestamp per Telegram user id. Implementations must
/// be shareable across handler tasks; atomicity of the check-and-record
/// sequence is the gate's responsibility, not the store's.
pub trait ScanTimerStore: Send + Sync {
    /// Read the user's last recorded scan time, if any
    fn last_scan(&self, user_id: i64) -> Result<Option<DateTime<Utc>>>;

    /// Record a scan time for the user, replacing any previous one
    fn record_scan(&self, user_id: i64, at: DateTime<Utc>) -> Result<()>;
}

/// Process-lifetime timer store backed by a mutex-guarded map.
/// Timers reset on restart.
#[derive(Debug, Default)]
pub struct InMemoryTimerStore {
    timers: Mutex<HashMap<i64, DateTime<Utc>>>,
}

impl InMemoryTimerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScanTimerStore for InMemoryTimerStore {
    fn last_scan(&self, user_id: i64) -> Result<Option<DateTime<Utc>>> {
        Ok(self.timers.lock().unwrap().get(&user_id).copied())
    }

    fn record_scan(&self, user_id: i64, at: DateTime<Utc>) -> Result<()> {
        self.timers.lock().unwrap().insert(user_id, at);
        Ok(())
    }
}

/// Outcome of a cooldown check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CooldownDecision {
    /// Scan permitted; the user's timer has been updated
    Allowed,
    /// Scan refused; `remaining` is the wait until the next permitted scan
    Denied { remaining: Duration },
}

/// Split a remaining duration into whole hours and leftover minutes,
/// rounding down, for the "scan again in Xh Ym" message.
pub fn hours_minutes(remaining: Duration) -> (i64, i64) {
    (remaining.num_hours(), remaining.num_minutes() % 60)
}

/// Cooldown gate over an injected timer store
///
/// # Concurrency
///
/// `check_and_record` runs under a single gate-level mutex, so two
/// concurrent scan attempts from the same user can never both pass.
/// Contention is low (one short critical section per button press).
pub struct CooldownGate {
    store: Box<dyn ScanTimerStore>,
    window: Duration,
    op_lock: Mutex<()>,
}

impl CooldownGate {
    /// Create a gate with the given store and cooldown window
    pub fn new(store: Box<dyn ScanTimerStore>, window: Duration) -> Self {
        Self {
            store,
            window,
            op_lock: Mutex::new(()),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Check whether the user may scan at `now` and, if so, record it.
    ///
    /// Returns `Allowed` when the user has no recorded scan or the window
    /// has fully elapsed (the exact boundary counts as elapsed). Returns
    /// `Denied` with the remaining wait otherwise; a denial never mutates
    /// the store, and neither does a store read/write error.
    pub fn check_and_record(&self, user_id: i64, now: DateTime<Utc>) -> Result<CooldownDecision> {
        let _guard = self.op_lock.lock().unwrap();

        if let Some(last) = self.store.last_scan(user_id)? {
            let elapsed = now - last;
            if elapsed < self.window {
                return Ok(CooldownDecision::Denied {
                    remaining: self.window - elapsed,
                });
            }
        }

        self.store.record_scan(user_id, now)?;
        Ok(CooldownDecision::Allowed)
    }
}
