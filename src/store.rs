//! Storage seams. The production deployment sits on a managed document store;
//! the engine only sees these two narrow traits, so tests (and the local
//! harness) inject in-memory doubles.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::model::ReportRecord;

/// Listing side of the report collection. Exhaustive by design: the scanner
/// owns all filtering. A geo-indexed backend can slot in behind the same
/// trait without touching the scanner contract.
#[async_trait::async_trait]
pub trait ReportStore: Send + Sync {
    async fn list_reports(&self) -> Result<Vec<ReportRecord>>;
}

/// Key-value side of the cooldown ledger. Keys are composite
/// `"<userId>_<reportId>"` strings; values are last-notified instants.
/// Upsert is last-write-wins, per the underlying store's document semantics.
#[async_trait::async_trait]
pub trait CooldownStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<DateTime<Utc>>>;
    async fn upsert(&self, key: &str, last_notified: DateTime<Utc>) -> Result<()>;
}

/// In-memory report collection, storage order = insertion order.
#[derive(Debug, Default)]
pub struct MemoryReports {
    inner: Mutex<Vec<ReportRecord>>,
}

impl MemoryReports {
    pub fn new(reports: Vec<ReportRecord>) -> Self {
        Self {
            inner: Mutex::new(reports),
        }
    }

    /// Load a snapshot of the report collection from a JSON array.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let reports: Vec<ReportRecord> =
            serde_json::from_str(json).context("parse reports snapshot")?;
        Ok(Self::new(reports))
    }
}

#[async_trait::async_trait]
impl ReportStore for MemoryReports {
    async fn list_reports(&self) -> Result<Vec<ReportRecord>> {
        Ok(self.inner.lock().expect("reports mutex poisoned").clone())
    }
}

/// In-memory cooldown map.
#[derive(Debug, Default)]
pub struct MemoryCooldowns {
    inner: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl MemoryCooldowns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot for assertions in tests and the demo bin.
    pub fn entries(&self) -> Vec<(String, DateTime<Utc>)> {
        let map = self.inner.lock().expect("cooldown mutex poisoned");
        let mut out: Vec<_> = map.iter().map(|(k, v)| (k.clone(), *v)).collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }
}

#[async_trait::async_trait]
impl CooldownStore for MemoryCooldowns {
    async fn get(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        Ok(self
            .inner
            .lock()
            .expect("cooldown mutex poisoned")
            .get(key)
            .copied())
    }

    async fn upsert(&self, key: &str, last_notified: DateTime<Utc>) -> Result<()> {
        self.inner
            .lock()
            .expect("cooldown mutex poisoned")
            .insert(key.to_string(), last_notified);
        Ok(())
    }
}
