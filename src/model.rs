//! Document shapes consumed by the trigger: the user-location write event and
//! the report records it is matched against. All of these are owned by the
//! mobile client / submission flow and read-only here.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// One user-location document as stored, i.e. the "after" state of a write.
/// Either field may be absent on partially-initialized users; an update
/// lacking one is not actionable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserLocationDoc {
    #[serde(default)]
    pub location: Option<GeoPoint>,
    #[serde(default, rename = "fcmToken")]
    pub fcm_token: Option<String>,
}

/// Before/after snapshot of a user-location write. Only `after` is consulted;
/// `before` is carried because the event source delivers it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationUpdateEvent {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub before: Option<UserLocationDoc>,
    pub after: UserLocationDoc,
}

/// One previously submitted pollution-source report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRecord {
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    /// A report without a coordinate is never eligible for matching.
    #[serde(default)]
    pub location: Option<GeoPoint>,
    /// Source-type label, e.g. "STREET_LIGHT"; free-form.
    #[serde(default, rename = "type")]
    pub report_type: Option<String>,
}

impl ReportRecord {
    /// Type label for user-facing copy, with the fixed fallback.
    pub fn type_label(&self) -> &str {
        self.report_type
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(crate::config::FALLBACK_REPORT_TYPE)
    }
}
