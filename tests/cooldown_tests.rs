use chrono::{Duration, Utc};
use std::sync::Arc;
use std::thread;

use glitchscan::cooldown::{
    hours_minutes, CooldownDecision, CooldownGate, InMemoryTimerStore, ScanTimerStore,
};

fn gate_16h() -> CooldownGate {
    CooldownGate::new(Box::new(InMemoryTimerStore::new()), Duration::hours(16))
}

/// The observed scenario: scan at T=0, denied at T=1h with 15h0m left,
/// allowed again at T=16h
#[test]
fn test_sixteen_hour_scan_cycle() {
    let gate = gate_16h();
    let start = Utc::now();
    let user = 42;

    assert_eq!(
        gate.check_and_record(user, start).unwrap(),
        CooldownDecision::Allowed
    );

    let denied = gate
        .check_and_record(user, start + Duration::hours(1))
        .unwrap();
    match denied {
        CooldownDecision::Denied { remaining } => {
            assert_eq!(hours_minutes(remaining), (15, 0));
        }
        CooldownDecision::Allowed => panic!("Second scan inside the window must be denied"),
    }

    assert_eq!(
        gate.check_and_record(user, start + Duration::hours(16))
            .unwrap(),
        CooldownDecision::Allowed
    );
}

/// Any second attempt inside the window is denied with the exact remainder
#[test]
fn test_remaining_time_tracks_elapsed() {
    let gate = gate_16h();
    let start = Utc::now();

    gate.check_and_record(1, start).unwrap();

    for minutes_elapsed in [1i64, 30, 90, 959] {
        let decision = gate
            .check_and_record(1, start + Duration::minutes(minutes_elapsed))
            .unwrap();
        let expected = Duration::minutes(16 * 60 - minutes_elapsed);
        assert_eq!(
            decision,
            CooldownDecision::Denied {
                remaining: expected
            },
            "wrong remainder after {} minutes",
            minutes_elapsed
        );
    }
}

/// A denial must not touch the stored timer
#[test]
fn test_denied_never_mutates_timer() {
    let store = Arc::new(InMemoryTimerStore::new());

    struct SharedStore(Arc<InMemoryTimerStore>);
    impl ScanTimerStore for SharedStore {
        fn last_scan(&self, user_id: i64) -> anyhow::Result<Option<chrono::DateTime<Utc>>> {
            self.0.last_scan(user_id)
        }
        fn record_scan(&self, user_id: i64, at: chrono::DateTime<Utc>) -> anyhow::Result<()> {
            self.0.record_scan(user_id, at)
        }
    }

    let gate = CooldownGate::new(
        Box::new(SharedStore(Arc::clone(&store))),
        Duration::hours(16),
    );
    let start = Utc::now();

    gate.check_and_record(7, start).unwrap();
    gate.check_and_record(7, start + Duration::hours(5)).unwrap();

    assert_eq!(store.last_scan(7).unwrap(), Some(start));
}

/// After a denial the original timer still governs: waiting out the window
/// from the first scan is enough
#[test]
fn test_denial_does_not_extend_window() {
    let gate = gate_16h();
    let start = Utc::now();

    gate.check_and_record(9, start).unwrap();
    gate.check_and_record(9, start + Duration::hours(15)).unwrap();

    assert_eq!(
        gate.check_and_record(9, start + Duration::hours(16))
            .unwrap(),
        CooldownDecision::Allowed
    );
}

/// Exactly one of many concurrent attempts by the same user may pass
#[test]
fn test_concurrent_attempts_admit_exactly_one() {
    let gate = Arc::new(gate_16h());
    let now = Utc::now();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let gate = Arc::clone(&gate);
            thread::spawn(move || gate.check_and_record(99, now).unwrap())
        })
        .collect();

    let allowed = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .filter(|decision| *decision == CooldownDecision::Allowed)
        .count();

    assert_eq!(allowed, 1);
}

/// The cooldown key is the user id alone; scanning a different category
/// does not reset or bypass it (documented assumption)
#[test]
fn test_window_is_per_user_not_per_category() {
    let gate = gate_16h();
    let start = Utc::now();

    assert_eq!(
        gate.check_and_record(5, start).unwrap(),
        CooldownDecision::Allowed
    );
    // Same user, notionally a different category: still denied
    assert!(matches!(
        gate.check_and_record(5, start + Duration::minutes(1)).unwrap(),
        CooldownDecision::Denied { .. }
    ));
    // A different user is unaffected
    assert_eq!(
        gate.check_and_record(6, start + Duration::minutes(1))
            .unwrap(),
        CooldownDecision::Allowed
    );
}

#[test]
fn test_configured_window_is_respected() {
    let gate = CooldownGate::new(Box::new(InMemoryTimerStore::new()), Duration::hours(2));
    let start = Utc::now();

    gate.check_and_record(1, start).unwrap();
    assert!(matches!(
        gate.check_and_record(1, start + Duration::hours(1)).unwrap(),
        CooldownDecision::Denied { .. }
    ));
    assert_eq!(
        gate.check_and_record(1, start + Duration::hours(2)).unwrap(),
        CooldownDecision::Allowed
    );
}
