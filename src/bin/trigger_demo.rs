//! Demo that walks one user past a reported street light twice: the first
//! update alerts, the immediate second one is suppressed by the cooldown.

use std::sync::Arc;

use skyglow_alerts::model::{GeoPoint, LocationUpdateEvent, ReportRecord, UserLocationDoc};
use skyglow_alerts::notify::log::LogNotifier;
use skyglow_alerts::store::{MemoryCooldowns, MemoryReports};
use skyglow_alerts::trigger::ProximityTrigger;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    let reports = Arc::new(MemoryReports::new(vec![ReportRecord {
        id: "r-demo".into(),
        user_id: "author".into(),
        location: Some(GeoPoint {
            latitude: 44.7900,
            longitude: 20.4500,
        }),
        report_type: Some("STREET_LIGHT".into()),
    }]));
    let cooldowns = Arc::new(MemoryCooldowns::new());
    let trigger = ProximityTrigger::new(reports, cooldowns.clone(), Arc::new(LogNotifier));

    let event = LocationUpdateEvent {
        user_id: "walker".into(),
        before: None,
        after: UserLocationDoc {
            location: Some(GeoPoint {
                latitude: 44.7866,
                longitude: 20.4489,
            }),
            fcm_token: Some("demo-token".into()),
        },
    };

    for pass in 1..=2 {
        let summary = trigger.handle(&event).await;
        println!("pass {pass}: {}", serde_json::to_string(&summary).unwrap());
        tokio::time::sleep(std::time::Duration::from_millis(400)).await;
    }

    for (key, ts) in cooldowns.entries() {
        println!("cooldown {key} -> {ts}");
    }

    println!("trigger-demo done");
}
