//! Route definitions for the VersionHub HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState` and
//! passes it to all handlers via Axum's `State` extractor.

use axum::{Router, middleware as axum_middleware, routing::get};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes and the request logger.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new().merge(version_routes()).merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Version endpoints: preview
fn version_routes() -> Router<AppState> {
    Router::new().route("/versions/preview", get(handlers::preview::get_preview))
}

/// Health endpoints
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
