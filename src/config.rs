//! Engine constants and runtime settings.
//!
//! The alerting constants are fixed by design (not tunable in production);
//! runtime settings come from the environment, `.env` included in dev.

use chrono::Duration as ChronoDuration;

/// Radius within which a report triggers an alert.
pub const PROXIMITY_RADIUS_METERS: f64 = 500.0;

/// Minimum time between repeat notifications for the same (user, report) pair.
pub const NOTIFICATION_COOLDOWN_MINUTES: i64 = 60;

/// User-facing copy (Serbian, matches the mobile client's locale).
pub const NOTIFICATION_TITLE: &str = "Izvor svetlosnog zagađenja u blizini!";

/// Type label used when a report carries no type.
pub const FALLBACK_REPORT_TYPE: &str = "izvor";

pub fn cooldown_window() -> ChronoDuration {
    ChronoDuration::minutes(NOTIFICATION_COOLDOWN_MINUTES)
}

/// Settings for the server binary. The library itself only uses the constants
/// above; everything here wires external collaborators.
#[derive(Debug, Clone)]
pub struct RuntimeSettings {
    /// Address the event hook listens on.
    pub bind_addr: String,
    /// Path to a JSON snapshot of the report collection (local harness).
    pub reports_path: Option<String>,
    /// FCM HTTP endpoint; absent means the log-only notifier is used.
    pub fcm_endpoint: Option<String>,
    /// Server key for the `Authorization` header.
    pub fcm_server_key: Option<String>,
}

impl RuntimeSettings {
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string()),
            reports_path: std::env::var("REPORTS_SNAPSHOT_PATH").ok(),
            fcm_endpoint: std::env::var("FCM_ENDPOINT").ok(),
            fcm_server_key: std::env::var("FCM_SERVER_KEY").ok(),
        }
    }
}
