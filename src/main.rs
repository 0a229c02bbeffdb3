//! Skyglow Alerts — Binary Entrypoint
//! Boots the Axum event hook, wiring the trigger engine to its collaborators:
//! a report snapshot, an in-memory cooldown ledger, and the push transport.
//!
//! See `README.md` for quickstart.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use skyglow_alerts::api::{create_router, AppState};
use skyglow_alerts::config::RuntimeSettings;
use skyglow_alerts::notify::{fcm::FcmNotifier, log::LogNotifier, Notifier};
use skyglow_alerts::store::{MemoryCooldowns, MemoryReports};
use skyglow_alerts::trigger::ProximityTrigger;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("skyglow_alerts=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

/// Report collection for the local harness: a JSON snapshot when configured,
/// empty otherwise. The production deployment swaps in a document-store
/// backed `ReportStore` behind the same trait.
fn load_reports(settings: &RuntimeSettings) -> Result<MemoryReports> {
    match &settings.reports_path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("read reports snapshot {path}"))?;
            MemoryReports::from_json_str(&json)
        }
        None => Ok(MemoryReports::default()),
    }
}

fn build_notifier(settings: &RuntimeSettings) -> Arc<dyn Notifier> {
    match (&settings.fcm_endpoint, &settings.fcm_server_key) {
        (Some(endpoint), Some(key)) => {
            tracing::info!(endpoint, "using FCM transport");
            Arc::new(FcmNotifier::new(endpoint.clone(), key.clone()))
        }
        _ => {
            tracing::warn!("FCM_ENDPOINT/FCM_SERVER_KEY not set, using log-only transport");
            Arc::new(LogNotifier)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    let settings = RuntimeSettings::from_env();

    let reports = Arc::new(load_reports(&settings)?);
    let cooldowns = Arc::new(MemoryCooldowns::new());
    let notifier = build_notifier(&settings);

    let trigger = Arc::new(ProximityTrigger::new(reports, cooldowns, notifier));
    let router = create_router(AppState { trigger });

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr)
        .await
        .with_context(|| format!("bind {}", settings.bind_addr))?;
    tracing::info!(addr = %settings.bind_addr, "location-update hook listening");

    axum::serve(listener, router).await.context("serve")?;
    Ok(())
}
