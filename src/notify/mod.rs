pub mod fcm;
pub mod log;

use anyhow::Result;

/// Outbound push payload: fixed title, interpolated body, one recipient token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushNotification {
    pub title: String,
    pub body: String,
    pub token: String,
}

/// Push-delivery transport seam. Implementations return `Ok(())` only on an
/// acknowledged delivery; the dispatcher advances the cooldown ledger on that
/// signal alone.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: &PushNotification) -> Result<()>;
}
