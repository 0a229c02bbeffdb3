//! The event handler invoked on every user-location write.
//!
//! Flow: validate the "after" state → scan for nearby reports → per report,
//! check the cooldown ledger and dispatch. All per-report branches run
//! concurrently and the handler returns only after every branch has settled;
//! one failed branch never aborts its siblings.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Serialize;

use crate::cooldown::CooldownLedger;
use crate::dispatch::{DispatchOutcome, NotificationDispatcher};
use crate::model::LocationUpdateEvent;
use crate::notify::Notifier;
use crate::scanner::ProximityScanner;
use crate::store::{CooldownStore, ReportStore};

/// Completion signal returned to the hosting runtime. Operational visibility
/// only; nothing downstream branches on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TriggerSummary {
    /// Update lacked a coordinate or push token; nothing was read or sent.
    Skipped,
    Completed {
        nearby: usize,
        dispatched: usize,
        suppressed: usize,
        failed: usize,
    },
}

enum Branch {
    Sent,
    Suppressed,
    Failed,
}

#[derive(Clone)]
pub struct ProximityTrigger {
    scanner: ProximityScanner,
    ledger: CooldownLedger,
    dispatcher: NotificationDispatcher,
}

impl ProximityTrigger {
    pub fn new(
        reports: Arc<dyn ReportStore>,
        cooldowns: Arc<dyn CooldownStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let ledger = CooldownLedger::new(cooldowns);
        Self {
            scanner: ProximityScanner::new(reports),
            dispatcher: NotificationDispatcher::new(notifier, ledger.clone()),
            ledger,
        }
    }

    pub async fn handle(&self, event: &LocationUpdateEvent) -> TriggerSummary {
        self.handle_at(event, Utc::now()).await
    }

    /// `handle` with an injected clock, for deterministic tests.
    pub async fn handle_at(
        &self,
        event: &LocationUpdateEvent,
        now: DateTime<Utc>,
    ) -> TriggerSummary {
        let user_id = event.user_id.as_str();

        // Validation: without a coordinate and a push token there is nothing
        // to do. A skip, not an error.
        let (Some(location), Some(token)) =
            (event.after.location, event.after.fcm_token.as_deref())
        else {
            tracing::info!(user_id, "location update without coordinate or fcm token, skipping");
            return TriggerSummary::Skipped;
        };

        let nearby = match self
            .scanner
            .find_nearby_reports(user_id, location.latitude, location.longitude)
            .await
        {
            Ok(nearby) => nearby,
            Err(e) => {
                tracing::error!(user_id, "report scan failed: {e:#}");
                return TriggerSummary::Completed {
                    nearby: 0,
                    dispatched: 0,
                    suppressed: 0,
                    failed: 1,
                };
            }
        };

        if nearby.is_empty() {
            tracing::debug!(user_id, "no reports within the alert radius");
            return TriggerSummary::Completed {
                nearby: 0,
                dispatched: 0,
                suppressed: 0,
                failed: 0,
            };
        }

        // Independent branches per report, awaited as a batch so the hosting
        // runtime cannot tear down in-flight sends.
        let branches = nearby.iter().map(|hit| async move {
            match self.ledger.is_suppressed(user_id, &hit.report.id, now).await {
                Ok(true) => {
                    tracing::debug!(user_id, report_id = %hit.report.id, "inside cooldown, skipping");
                    Branch::Suppressed
                }
                Ok(false) => {
                    tracing::info!(
                        user_id,
                        report_id = %hit.report.id,
                        distance_m = hit.distance_m.round(),
                        "nearby report, dispatching"
                    );
                    match self.dispatcher.dispatch(user_id, &hit.report, token, now).await {
                        DispatchOutcome::Sent => Branch::Sent,
                        DispatchOutcome::Failed(_) => Branch::Failed,
                    }
                }
                Err(e) => {
                    // Fatal for this report only; siblings keep running.
                    tracing::warn!(user_id, report_id = %hit.report.id, "cooldown read failed: {e:#}");
                    Branch::Failed
                }
            }
        });

        let settled = join_all(branches).await;

        let mut dispatched = 0;
        let mut suppressed = 0;
        let mut failed = 0;
        for branch in &settled {
            match branch {
                Branch::Sent => dispatched += 1,
                Branch::Suppressed => suppressed += 1,
                Branch::Failed => failed += 1,
            }
        }

        TriggerSummary::Completed {
            nearby: settled.len(),
            dispatched,
            suppressed,
            failed,
        }
    }
}
