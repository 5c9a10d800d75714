//! Health check handlers.

use axum::Json;
use axum::extract::State;

use versionhub_core::traits::CacheProvider;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let storage = matches!(state.storage.health_check().await, Ok(true));
    let cache = matches!(state.cache.health_check().await, Ok(true));

    let label = |ok: bool| if ok { "available" } else { "unavailable" }.to_string();

    Json(ApiResponse::ok(HealthResponse {
        status: if storage && cache { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        storage: label(storage),
        cache: label(cache),
    }))
}
