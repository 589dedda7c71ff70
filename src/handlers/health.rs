use axum::{extract::State, Json};
use serde::Serialize;

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
}

/// GET /health - central registry liveness
pub async fn health(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    state.registry.health_check().await.map_err(|e| {
        tracing::error!("Health check failed: {}", e);
        ApiError::service_unavailable("database unavailable")
    })?;

    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        database: "ok",
    }))
}
