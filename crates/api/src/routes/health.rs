use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database REST endpoint is reachable.
    pub db_healthy: bool,
    /// Whether the analysis engine is reachable.
    pub engine_healthy: bool,
}

/// GET /health -- returns service and collaborator health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = leadrelay_db::health_check(&state.db).await.is_ok();
    let engine_healthy = state.engine.health_check().await.is_ok();

    let status = if db_healthy && engine_healthy {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        engine_healthy,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
