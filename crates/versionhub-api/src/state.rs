//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use versionhub_cache::CacheManager;
use versionhub_core::config::AppConfig;
use versionhub_core::traits::StorageProvider;
use versionhub_service::PreviewResolutionService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// When the state was built
    pub started_at: Instant,

    // ── Infrastructure ───────────────────────────────────────
    /// Storage provider rooted at the data directory
    pub storage: Arc<dyn StorageProvider>,
    /// In-memory cache holding the preview index
    pub cache: Arc<CacheManager>,

    // ── Services ─────────────────────────────────────────────
    /// Preview resolution for live files and versions
    pub preview_service: Arc<PreviewResolutionService>,
}
