//! # versionhub-api
//!
//! HTTP API layer for VersionHub built on Axum.
//!
//! Provides the preview and health endpoints, the identity extractor,
//! request logging, DTOs, and the mapping from service errors to HTTP
//! responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, run_server};
pub use state::AppState;
