// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod config;
pub mod cooldown;
pub mod dispatch;
pub mod geo;
pub mod model;
pub mod scanner;
pub mod store;
pub mod trigger;

// Push-delivery transports
pub mod notify;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::model::{GeoPoint, LocationUpdateEvent, ReportRecord, UserLocationDoc};
pub use crate::notify::{Notifier, PushNotification};
pub use crate::trigger::{ProximityTrigger, TriggerSummary};
