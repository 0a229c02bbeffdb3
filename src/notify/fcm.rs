use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use super::{Notifier, PushNotification};

/// FCM-style HTTP push sender. The small retry loop here stands in for the
/// implicit retry an official messaging SDK performs; the application layer
/// itself never retries (delivery is at-least-once across location updates).
#[derive(Clone)]
pub struct FcmNotifier {
    endpoint: String,
    server_key: String,
    client: Client,
    timeout: Duration,
    max_retries: u8,
}

impl FcmNotifier {
    pub fn new(endpoint: String, server_key: String) -> Self {
        Self {
            endpoint,
            server_key,
            client: Client::new(),
            timeout: Duration::from_secs(5),
            max_retries: 3,
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    pub fn with_retries(mut self, retries: u8) -> Self {
        self.max_retries = retries;
        self
    }
}

#[async_trait::async_trait]
impl Notifier for FcmNotifier {
    async fn send(&self, notification: &PushNotification) -> Result<()> {
        let payload = FcmMessage::from(notification);

        let mut attempt: u8 = 0;
        loop {
            attempt += 1;
            let res = self
                .client
                .post(&self.endpoint)
                .header("Authorization", format!("key={}", self.server_key))
                .timeout(self.timeout)
                .json(&payload)
                .send()
                .await;

            match res {
                Ok(rsp) => {
                    if let Err(e) = rsp.error_for_status_ref() {
                        if attempt < self.max_retries {
                            tokio::time::sleep(Duration::from_millis(500u64 << (attempt - 1)))
                                .await;
                            continue;
                        }
                        return Err(anyhow!("FCM HTTP error: {e}"));
                    }
                    return Ok(());
                }
                Err(e) => {
                    if attempt < self.max_retries {
                        tokio::time::sleep(Duration::from_millis(500u64 << (attempt - 1))).await;
                        continue;
                    }
                    return Err(anyhow!("FCM request failed: {e}"));
                }
            }
        }
    }
}

#[derive(Serialize)]
struct FcmNotificationBody {
    title: String,
    body: String,
}

#[derive(Serialize)]
struct FcmMessage {
    notification: FcmNotificationBody,
    token: String,
}

impl From<&PushNotification> for FcmMessage {
    fn from(n: &PushNotification) -> Self {
        Self {
            notification: FcmNotificationBody {
                title: n.title.clone(),
                body: n.body.clone(),
            },
            token: n.token.clone(),
        }
    }
}
