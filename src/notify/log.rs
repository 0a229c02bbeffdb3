use anyhow::Result;

use super::{Notifier, PushNotification};

/// Log-only sink for local runs and the demo bin. Acks every send, so the
/// cooldown ledger behaves exactly as it would against a live transport.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait::async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, notification: &PushNotification) -> Result<()> {
        tracing::info!(
            token = %notification.token,
            title = %notification.title,
            body = %notification.body,
            "push (log-only transport)"
        );
        Ok(())
    }
}
