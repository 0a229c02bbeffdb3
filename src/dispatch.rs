//! Composes and sends one push alert, then records the send in the cooldown
//! ledger. Delivery is at-least-once: the ledger only advances on an
//! acknowledged send, so a failed delivery is retried naturally by the next
//! location update.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::{NOTIFICATION_TITLE, PROXIMITY_RADIUS_METERS};
use crate::cooldown::CooldownLedger;
use crate::model::ReportRecord;
use crate::notify::{Notifier, PushNotification};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent,
    Failed(String),
}

/// Body copy interpolating the report's type label and the alert radius.
pub fn alert_body(report: &ReportRecord) -> String {
    format!(
        "Prijavljeni {} se nalazi na manje od {} metara od vas.",
        report.type_label(),
        PROXIMITY_RADIUS_METERS as i64
    )
}

#[derive(Clone)]
pub struct NotificationDispatcher {
    notifier: Arc<dyn Notifier>,
    ledger: CooldownLedger,
}

impl NotificationDispatcher {
    pub fn new(notifier: Arc<dyn Notifier>, ledger: CooldownLedger) -> Self {
        Self { notifier, ledger }
    }

    /// Send one alert about `report` to `fcm_token` and, on an acknowledged
    /// delivery, record the send for (`user_id`, report) at `now`.
    ///
    /// Failures are terminal here: logged, ledger untouched, no propagation.
    pub async fn dispatch(
        &self,
        user_id: &str,
        report: &ReportRecord,
        fcm_token: &str,
        now: DateTime<Utc>,
    ) -> DispatchOutcome {
        let notification = PushNotification {
            title: NOTIFICATION_TITLE.to_string(),
            body: alert_body(report),
            token: fcm_token.to_string(),
        };

        match self.notifier.send(&notification).await {
            Ok(()) => {
                tracing::info!(user_id, report_id = %report.id, "notification sent");
                if let Err(e) = self
                    .ledger
                    .record_notification(user_id, &report.id, now)
                    .await
                {
                    // The send went out; a lost ledger write means at worst
                    // one extra alert after the next update.
                    tracing::warn!(user_id, report_id = %report.id, "cooldown write failed: {e:#}");
                }
                DispatchOutcome::Sent
            }
            Err(e) => {
                tracing::error!(user_id, report_id = %report.id, "push send failed: {e:#}");
                DispatchOutcome::Failed(format!("{e:#}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GeoPoint;

    #[test]
    fn body_interpolates_type_and_radius() {
        let r = ReportRecord {
            id: "r1".into(),
            user_id: "u1".into(),
            location: Some(GeoPoint {
                latitude: 44.79,
                longitude: 20.45,
            }),
            report_type: Some("STREET_LIGHT".into()),
        };
        let body = alert_body(&r);
        assert!(body.contains("STREET_LIGHT"));
        assert!(body.contains("500"));
    }

    #[test]
    fn body_uses_fallback_label_without_a_type() {
        let r = ReportRecord {
            id: "r1".into(),
            user_id: "u1".into(),
            location: None,
            report_type: None,
        };
        assert!(alert_body(&r).contains("izvor"));
    }
}
