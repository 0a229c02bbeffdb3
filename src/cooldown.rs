//! Cooldown gate to prevent notification spam.
//! - No record for a (user, report) pair: alert allowed.
//! - Inside the 60-minute window: suppressed.
//! - State is advanced explicitly via `record_notification` after a
//!   successful send, never on suppression checks.

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::config::cooldown_window;
use crate::store::CooldownStore;

/// Composite key scoping suppression state to one (user, report) pair.
/// Keying by report alone would suppress other nearby users; keying by user
/// alone would suppress alerts about different reports.
pub fn cooldown_key(user_id: &str, report_id: &str) -> String {
    format!("{user_id}_{report_id}")
}

/// Per-(user, report) suppression ledger over an injected key-value store.
///
/// Concurrent overlapping invocations for the same user can race on the same
/// key; the store's last-write-wins upsert makes the worst case one duplicate
/// notification, which at-least-once delivery already permits.
#[derive(Clone)]
pub struct CooldownLedger {
    store: Arc<dyn CooldownStore>,
}

impl CooldownLedger {
    pub fn new(store: Arc<dyn CooldownStore>) -> Self {
        Self { store }
    }

    /// Check whether the pair is inside its cooldown window at `now`.
    /// Does NOT mutate state.
    pub async fn is_suppressed(
        &self,
        user_id: &str,
        report_id: &str,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let key = cooldown_key(user_id, report_id);
        match self.store.get(&key).await? {
            None => Ok(false),
            Some(last_notified) => {
                Ok(now.signed_duration_since(last_notified) < cooldown_window())
            }
        }
    }

    /// Record that a notification for the pair went out at `now`.
    pub async fn record_notification(
        &self,
        user_id: &str,
        report_id: &str,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let key = cooldown_key(user_id, report_id);
        self.store.upsert(&key, now).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryCooldowns;
    use chrono::{Duration as ChronoDuration, TimeZone};

    fn ledger() -> (CooldownLedger, Arc<MemoryCooldowns>) {
        let store = Arc::new(MemoryCooldowns::new());
        (CooldownLedger::new(store.clone()), store)
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 6, 9, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn never_notified_pair_is_not_suppressed() {
        let (ledger, _) = ledger();
        assert!(!ledger.is_suppressed("u1", "r1", t0()).await.unwrap());
    }

    #[tokio::test]
    async fn suppressed_at_59_minutes_allowed_at_61() {
        let (ledger, _) = ledger();
        ledger.record_notification("u1", "r1", t0()).await.unwrap();

        let at_59 = t0() + ChronoDuration::minutes(59);
        assert!(ledger.is_suppressed("u1", "r1", at_59).await.unwrap());

        let at_61 = t0() + ChronoDuration::minutes(61);
        assert!(!ledger.is_suppressed("u1", "r1", at_61).await.unwrap());
    }

    #[tokio::test]
    async fn pairs_are_scoped_independently() {
        let (ledger, _) = ledger();
        ledger.record_notification("u1", "r1", t0()).await.unwrap();

        // Same report, different user: not suppressed.
        assert!(!ledger.is_suppressed("u2", "r1", t0()).await.unwrap());
        // Same user, different report: not suppressed.
        assert!(!ledger.is_suppressed("u1", "r2", t0()).await.unwrap());
    }

    #[tokio::test]
    async fn record_upserts_the_composite_key() {
        let (ledger, store) = ledger();
        ledger.record_notification("U", "R1", t0()).await.unwrap();
        let entries = store.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, "U_R1");
        assert_eq!(entries[0].1, t0());
    }
}
