//! Flood Risk Gateway
//!
//! HTTP layer over the `flood-model` crate. The model is provisioned once
//! at startup and injected into the router as read-only shared state; every
//! request handler sees the same immutable regressor.

use std::path::Path;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use flood_model::{ProvisionOutcome, RiskModel};
use tower_http::{cors::CorsLayer, services::ServeDir};

pub mod config;
pub mod routes;

/// How the running process obtained its model, surfaced by /health.
#[derive(Clone)]
pub struct ModelProvenance {
    /// "loaded" or "retrained".
    pub source: &'static str,
    /// RFC 3339 timestamp of provisioning.
    pub provisioned_at: String,
}

impl ModelProvenance {
    pub fn from_outcome(outcome: &ProvisionOutcome) -> Self {
        Self {
            source: outcome.source(),
            provisioned_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Read-only state shared by all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<RiskModel>,
    pub provenance: Arc<ModelProvenance>,
}

impl AppState {
    pub fn new(model: RiskModel, provenance: ModelProvenance) -> Self {
        Self {
            model: Arc::new(model),
            provenance: Arc::new(provenance),
        }
    }
}

/// Build the application router.
///
/// The static map page is served at `/` when the asset directory exists;
/// the API works without it.
pub fn app(state: AppState, static_dir: &Path) -> Router {
    let api = Router::new()
        .route("/predict_risk", post(routes::predict_risk))
        .route("/health", get(routes::health))
        .with_state(state)
        .layer(CorsLayer::permissive());

    if static_dir.exists() {
        tracing::info!("Serving map page from {}", static_dir.display());
        api.fallback_service(ServeDir::new(static_dir))
    } else {
        tracing::warn!(
            "Static asset directory {} not found; serving API only",
            static_dir.display()
        );
        api
    }
}
