//! Application builder: wires collaborators, services, and router into an
//! Axum app and runs it.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::Router;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;

use versionhub_cache::CacheManager;
use versionhub_core::config::AppConfig;
use versionhub_core::error::AppError;
use versionhub_core::traits::{CacheProvider, StorageProvider};
use versionhub_service::{PreviewResolutionService, StaticMimeIconProvider};
use versionhub_storage::thumbnail::PREVIEW_DIR;
use versionhub_storage::{LocalStorageProvider, LocalUserTree, LocalVersionStore, ThumbnailCache};

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state).layer(TraceLayer::new_for_http())
}

/// Builds the application state for `config`.
pub async fn build_state(config: AppConfig) -> Result<AppState, AppError> {
    // ── Step 1: Create data directories ──────────────────────────
    create_data_directories(&config).await?;

    // ── Step 2: Initialize cache ─────────────────────────────────
    let cache = Arc::new(CacheManager::new(&config.cache));

    // ── Step 3: Initialize storage provider ──────────────────────
    tracing::info!(data_root = %config.storage.data_root, "Initializing storage...");
    let storage: Arc<dyn StorageProvider> =
        Arc::new(LocalStorageProvider::new(&config.storage.data_root).await?);

    // ── Step 4: Initialize collaborators ─────────────────────────
    let tree = Arc::new(LocalUserTree::new(Arc::clone(&storage)));
    let versions = Arc::new(LocalVersionStore::new(Arc::clone(&storage)));
    let previews = Arc::new(ThumbnailCache::new(
        Arc::clone(&storage),
        Arc::clone(&cache) as Arc<dyn CacheProvider>,
        &config.preview,
    ));
    let icons = Arc::new(StaticMimeIconProvider::new(
        config.preview.mime_icon_base_url.clone(),
    ));

    // ── Step 5: Initialize services ──────────────────────────────
    let preview_service = Arc::new(PreviewResolutionService::new(tree, versions, previews, icons));

    Ok(AppState {
        config: Arc::new(config),
        started_at: Instant::now(),
        storage,
        cache,
        preview_service,
    })
}

/// Runs the VersionHub server until a shutdown signal arrives.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting VersionHub server...");

    let addr = config.server.bind_address();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let state = build_state(config).await?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("VersionHub server listening on {}", addr);

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.changed().await;
            })
            .await
    });

    tokio::select! {
        result = &mut server => return finish(result),
        _ = shutdown_signal() => {}
    }

    tracing::info!(grace_seconds = grace.as_secs(), "Shutting down...");
    let _ = shutdown_tx.send(true);

    match tokio::time::timeout(grace, server).await {
        Ok(result) => finish(result),
        Err(_) => {
            tracing::warn!("Graceful shutdown timed out, dropping open connections");
            Ok(())
        }
    }
}

fn finish(
    result: Result<std::io::Result<()>, tokio::task::JoinError>,
) -> Result<(), AppError> {
    match result {
        Ok(Ok(())) => {
            tracing::info!("Server stopped");
            Ok(())
        }
        Ok(Err(e)) => Err(AppError::internal(format!("Server error: {}", e))),
        Err(e) => Err(AppError::internal(format!("Server task failed: {}", e))),
    }
}

async fn create_data_directories(config: &AppConfig) -> Result<(), AppError> {
    let dirs = [
        config.storage.data_root.clone(),
        format!("{}/{}", config.storage.data_root, PREVIEW_DIR),
    ];

    for dir in &dirs {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| AppError::internal(format!("Failed to create dir '{}': {}", dir, e)))?;
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
