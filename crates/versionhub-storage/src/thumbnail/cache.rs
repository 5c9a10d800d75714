//! Preview provider reusing stored previews.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};
use uuid::Uuid;

use versionhub_cache::keys;
use versionhub_core::config::preview::PreviewConfig;
use versionhub_core::error::{ErrorKind, PreviewError};
use versionhub_core::traits::cache::CacheProvider;
use versionhub_core::traits::preview::PreviewProvider;
use versionhub_core::traits::storage::StorageProvider;
use versionhub_core::types::{PreviewFile, PreviewMeta, PreviewRequest};

use super::generator::ThumbnailGenerator;
use super::locks::KeyedLocks;
use super::renderer::RendererRegistry;
use super::sizing::{self, OutputFormat};

/// Directory holding stored previews, relative to the data root.
pub const PREVIEW_DIR: &str = "appdata/previews";

/// Stored-preview cache.
///
/// Previews are keyed by the artifact's content identity plus the variant,
/// so a live file and each of its versions get separate entries. A variant
/// is rendered at most once; concurrent requests for the same variant wait
/// for the first one, and requests for different variants of one artifact
/// share the generator's single max preview render.
#[derive(Debug, Clone)]
pub struct ThumbnailCache {
    /// Renders and stores previews.
    generator: ThumbnailGenerator,
    /// In-memory index of stored preview metadata.
    index: Arc<dyn CacheProvider>,
    /// Per-variant render locks.
    locks: KeyedLocks<String>,
    /// Whether previews are served at all.
    enabled: bool,
    max_width: u32,
    max_height: u32,
}

impl ThumbnailCache {
    /// Create a cache with the built-in renderers.
    pub fn new(
        provider: Arc<dyn StorageProvider>,
        index: Arc<dyn CacheProvider>,
        config: &PreviewConfig,
    ) -> Self {
        Self::with_registry(provider, index, config, RendererRegistry::with_defaults())
    }

    /// Create a cache with a custom renderer registry.
    pub fn with_registry(
        provider: Arc<dyn StorageProvider>,
        index: Arc<dyn CacheProvider>,
        config: &PreviewConfig,
        registry: RendererRegistry,
    ) -> Self {
        let generator = ThumbnailGenerator::new(
            provider,
            PREVIEW_DIR,
            registry,
            config.max_width,
            config.max_height,
        );
        Self {
            generator,
            index,
            locks: KeyedLocks::new(),
            enabled: config.enabled,
            max_width: config.max_width,
            max_height: config.max_height,
        }
    }

    /// Look up a variant in the index, dropping entries whose file is gone.
    async fn lookup_indexed(&self, key: &str, content_id: Uuid) -> Option<PreviewFile> {
        let raw = match self.index.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "Preview index lookup failed");
                return None;
            }
        };

        if let Ok(meta) = serde_json::from_str::<PreviewMeta>(&raw) {
            match self.generator.read(content_id, &meta.name).await {
                Ok(data) => return Some(PreviewFile::from_meta(meta, data)),
                Err(PreviewError::Backend(e)) if e.kind == ErrorKind::NotFound => {}
                Err(e) => {
                    warn!(key, error = %e, "Failed to read indexed preview");
                    return None;
                }
            }
        }

        debug!(key, "Dropping stale preview index entry");
        if let Err(e) = self.index.delete(key).await {
            warn!(key, error = %e, "Failed to drop stale preview index entry");
        }
        None
    }

    async fn remember(&self, key: &str, meta: &PreviewMeta) {
        let stored = match serde_json::to_string(meta) {
            Ok(json) => self.index.set_default(key, &json).await,
            Err(e) => Err(e.into()),
        };
        if let Err(e) = stored {
            warn!(key, error = %e, "Failed to index preview");
        }
    }

    async fn load_or_render(
        &self,
        request: &PreviewRequest,
        name: &str,
        format: OutputFormat,
    ) -> Result<PreviewFile, PreviewError> {
        let content_id = request.file.content_id;
        let meta = match self.generator.stored(content_id, name, format).await? {
            Some(meta) => meta,
            None => self.generator.generate(request, name, format).await?,
        };
        let data = self.generator.read(content_id, name).await?;
        Ok(PreviewFile::from_meta(meta, data))
    }
}

#[async_trait]
impl PreviewProvider for ThumbnailCache {
    async fn get_preview(&self, request: &PreviewRequest) -> Result<PreviewFile, PreviewError> {
        let mime = request.mime_hint.as_str();
        if !self.enabled {
            return Err(PreviewError::unavailable(mime, "previews are disabled"));
        }
        if request.width == 0 || request.height == 0 {
            return Err(PreviewError::InvalidArgument(format!(
                "preview size must be positive, got {}x{}",
                request.width, request.height
            )));
        }
        if !self.generator.is_supported(mime) {
            return Err(PreviewError::unavailable(mime, "no renderer registered"));
        }

        let mut request = request.clone();
        request.width = request.width.min(self.max_width);
        request.height = request.height.min(self.max_height);

        let content_id = request.file.content_id;
        let format = OutputFormat::for_mime(mime);
        let name = sizing::variant_name(
            request.width,
            request.height,
            request.crop,
            request.mode,
            format,
        );
        let key = keys::preview_meta(content_id, &name);

        if let Some(preview) = self.lookup_indexed(&key, content_id).await {
            debug!(key, "Serving indexed preview");
            return Ok(preview);
        }

        let preview = self
            .locks
            .run(key.clone(), self.load_or_render(&request, &name, format))
            .await?;
        self.remember(&key, &preview.meta()).await;
        Ok(preview)
    }
}
