// tests/api_http.rs
// Router-level tests via tower's `oneshot`, no listener.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    Router,
};
use http::{Request, StatusCode};
use tower::ServiceExt; // for `oneshot` (tower 0.5 with features=["util"])

use skyglow_alerts::api::{create_router, AppState};
use skyglow_alerts::model::{GeoPoint, ReportRecord};
use skyglow_alerts::notify::{Notifier, PushNotification};
use skyglow_alerts::store::{MemoryCooldowns, MemoryReports};
use skyglow_alerts::trigger::ProximityTrigger;

#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<PushNotification>>,
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, notification: &PushNotification) -> Result<()> {
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

fn app(notifier: Arc<RecordingNotifier>) -> Router {
    let reports = Arc::new(MemoryReports::new(vec![ReportRecord {
        id: "R1".into(),
        user_id: "author".into(),
        location: Some(GeoPoint {
            latitude: 44.7900,
            longitude: 20.4500,
        }),
        report_type: Some("STREET_LIGHT".into()),
    }]));
    let trigger = Arc::new(ProximityTrigger::new(
        reports,
        Arc::new(MemoryCooldowns::new()),
        notifier,
    ));
    create_router(AppState { trigger })
}

#[tokio::test]
async fn health_answers_ok() {
    let app = app(Arc::new(RecordingNotifier::default()));
    let resp = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn hook_dispatches_for_a_nearby_user() {
    let notifier = Arc::new(RecordingNotifier::default());
    let app = app(notifier.clone());

    let req = Request::builder()
        .method("POST")
        .uri("/hooks/location-updated")
        .header("content-type", "application/json")
        .body(Body::from(
            r#"{"userId":"U","after":{"location":{"latitude":44.7866,"longitude":20.4489},"fcmToken":"tok"}}"#,
        ))
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let s = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(s.contains("\"outcome\":\"completed\""), "body: {s}");
    assert!(s.contains("\"dispatched\":1"), "body: {s}");

    assert_eq!(notifier.sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn hook_skips_an_update_without_a_token() {
    let notifier = Arc::new(RecordingNotifier::default());
    let app = app(notifier.clone());

    let req = Request::builder()
        .method("POST")
        .uri("/hooks/location-updated")
        .header("content-type", "application/json")
        .body(Body::from(
            r#"{"userId":"U","after":{"location":{"latitude":44.7866,"longitude":20.4489}}}"#,
        ))
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let s = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(s.contains("\"outcome\":\"skipped\""), "body: {s}");
    assert!(notifier.sent.lock().unwrap().is_empty());
}
