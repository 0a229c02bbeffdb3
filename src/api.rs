use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::model::LocationUpdateEvent;
use crate::trigger::{ProximityTrigger, TriggerSummary};

#[derive(Clone)]
pub struct AppState {
    pub trigger: Arc<ProximityTrigger>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/hooks/location-updated", post(location_updated))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// The on-update event hook: one user-location write per request, with the
/// before/after snapshot in the body. Always answers 200 — delivery failures
/// are terminal server-side and never surface to the originating client.
async fn location_updated(
    State(state): State<AppState>,
    Json(event): Json<LocationUpdateEvent>,
) -> Json<TriggerSummary> {
    Json(state.trigger.handle(&event).await)
}
