//! Readiness endpoint, served on its own port next to the webhook.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use listo_db::WatchlistRepository;
use serde::Serialize;
use tracing::{error, info};

#[derive(Clone)]
pub struct HealthState {
    repository: Arc<dyn WatchlistRepository>,
    collection: Arc<str>,
}

impl HealthState {
    pub fn new(repository: Arc<dyn WatchlistRepository>, collection: &str) -> Self {
        Self { repository, collection: Arc::from(collection) }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Readiness {
    Ready,
    Degraded,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WatchlistProbe {
    pub status: Readiness,
    pub collection: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: Readiness,
    pub version: &'static str,
    pub watchlist: WatchlistProbe,
    pub checked_at: String,
}

pub fn router(state: HealthState) -> Router {
    Router::new().route("/health", get(health)).with_state(state)
}

pub async fn spawn(bind_address: &str, port: u16, state: HealthState) -> std::io::Result<()> {
    let address = format!("{bind_address}:{port}");
    let listener = tokio::net::TcpListener::bind(&address).await?;

    info!(
        event_name = "system.health.start",
        correlation_id = "bootstrap",
        bind_address = %address,
        "health endpoint started"
    );

    tokio::spawn(async move {
        if let Err(error) = axum::serve(listener, router(state)).await {
            error!(
                event_name = "system.health.error",
                correlation_id = "bootstrap",
                error = %error,
                "health endpoint server terminated unexpectedly"
            );
        }
    });

    Ok(())
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let watchlist = match state.repository.count(&state.collection).await {
        Ok(records) => WatchlistProbe {
            status: Readiness::Ready,
            collection: state.collection.to_string(),
            records: Some(records),
            error: None,
        },
        Err(source) => WatchlistProbe {
            status: Readiness::Degraded,
            collection: state.collection.to_string(),
            records: None,
            error: Some(source.to_string()),
        },
    };

    let status = watchlist.status.clone();
    let code = match status {
        Readiness::Ready => StatusCode::OK,
        Readiness::Degraded => StatusCode::SERVICE_UNAVAILABLE,
    };
    let payload = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        watchlist,
        checked_at: Utc::now().to_rfc3339(),
    };

    (code, Json(payload))
}
