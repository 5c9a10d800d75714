//! Two-stage preview generator.
//!
//! The first request for an artifact renders a "max" preview (bounded by the
//! configured maximum size) and stores it. Every sized variant is then
//! derived from the max preview instead of from the source content. The max
//! preview is rendered under a per-content lock, so concurrent requests for
//! different sizes of one artifact share a single render.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use image::DynamicImage;
use tracing::{debug, warn};
use uuid::Uuid;

use versionhub_core::error::{AppError, ErrorKind, PreviewError};
use versionhub_core::traits::storage::StorageProvider;
use versionhub_core::types::{FileNode, PreviewMeta, PreviewRequest};

use super::locks::KeyedLocks;
use super::renderer::RendererRegistry;
use super::sizing::{self, OutputFormat};

/// File name of the max preview inside an artifact's preview directory.
pub const MAX_PREVIEW_NAME: &str = "max.png";

/// Renders previews and stores them on a storage provider.
#[derive(Debug, Clone)]
pub struct ThumbnailGenerator {
    /// Storage provider holding both the sources and the previews.
    provider: Arc<dyn StorageProvider>,
    /// Preview output directory path.
    output_dir: String,
    /// Renderers by mimetype.
    registry: RendererRegistry,
    /// Bounds of the max preview.
    max_width: u32,
    max_height: u32,
    /// Max preview render locks, by content identity.
    max_locks: KeyedLocks<Uuid>,
}

impl ThumbnailGenerator {
    /// Create a new generator writing below `output_dir`.
    pub fn new(
        provider: Arc<dyn StorageProvider>,
        output_dir: &str,
        registry: RendererRegistry,
        max_width: u32,
        max_height: u32,
    ) -> Self {
        Self {
            provider,
            output_dir: output_dir.trim_end_matches('/').to_string(),
            registry,
            max_width,
            max_height,
            max_locks: KeyedLocks::new(),
        }
    }

    /// Whether a renderer is registered for `mime`.
    pub fn is_supported(&self, mime: &str) -> bool {
        self.registry.is_supported(mime)
    }

    /// Storage path of the preview directory of `content_id`.
    pub fn preview_dir(&self, content_id: Uuid) -> String {
        format!("{}/{}", self.output_dir, content_id)
    }

    /// Storage path of a stored preview.
    pub fn preview_path(&self, content_id: Uuid, name: &str) -> String {
        format!("{}/{}", self.preview_dir(content_id), name)
    }

    /// Metadata of a stored preview, if it exists.
    pub async fn stored(
        &self,
        content_id: Uuid,
        name: &str,
        format: OutputFormat,
    ) -> Result<Option<PreviewMeta>, PreviewError> {
        let path = self.preview_path(content_id, name);
        match self.provider.metadata(&path).await {
            Ok(meta) if !meta.is_directory => Ok(Some(PreviewMeta {
                name: name.to_string(),
                mime_type: format.mime_type().to_string(),
                modified_at: meta.last_modified.unwrap_or_else(Utc::now),
            })),
            Ok(_) => Ok(None),
            Err(e) if e.kind == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PreviewError::Backend(e)),
        }
    }

    /// Read the bytes of a stored preview.
    pub async fn read(&self, content_id: Uuid, name: &str) -> Result<Bytes, PreviewError> {
        let path = self.preview_path(content_id, name);
        Ok(self.provider.read_bytes(&path).await?)
    }

    /// Render and store the variant `name` for `request`.
    ///
    /// `request` must already be clamped to the max preview bounds.
    pub async fn generate(
        &self,
        request: &PreviewRequest,
        name: &str,
        format: OutputFormat,
    ) -> Result<PreviewMeta, PreviewError> {
        let content_id = request.file.content_id;
        let max = self
            .max_locks
            .run(content_id, self.ensure_max_preview(&request.file, &request.mime_hint))
            .await?;

        let (width, height, crop, mode) =
            (request.width, request.height, request.crop, request.mode);
        let data = tokio::task::spawn_blocking(move || {
            let resized = sizing::resize(&max, width, height, crop, mode);
            sizing::encode(&resized, format)
        })
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Thumbnail task panicked", e))??;

        let path = self.preview_path(content_id, name);
        self.provider.write(&path, data).await?;

        debug!(
            source = %request.file.storage_path,
            width,
            height,
            crop,
            mode = %mode,
            output = %path,
            "Generated preview"
        );

        self.stored(content_id, name, format).await?.ok_or_else(|| {
            PreviewError::Backend(AppError::storage(format!(
                "Preview vanished after write: {path}"
            )))
        })
    }

    /// Return the max preview of `file`, rendering and storing it if none is
    /// stored or the stored one cannot be decoded.
    async fn ensure_max_preview(
        &self,
        file: &FileNode,
        mime: &str,
    ) -> Result<DynamicImage, PreviewError> {
        let path = self.preview_path(file.content_id, MAX_PREVIEW_NAME);
        match self.provider.read_bytes(&path).await {
            Ok(data) => match decode_stored(data).await? {
                Some(img) => return Ok(img),
                None => warn!(path = %path, "Stored max preview is unreadable, rendering again"),
            },
            Err(e) if e.kind == ErrorKind::NotFound => {}
            Err(e) => return Err(PreviewError::Backend(e)),
        }

        let renderer = self
            .registry
            .find(mime)
            .ok_or_else(|| PreviewError::unavailable(mime, "no renderer registered"))?;

        let source = match self.provider.read_bytes(&file.storage_path).await {
            Ok(data) => data,
            Err(e) if e.kind == ErrorKind::NotFound => {
                return Err(PreviewError::unavailable(mime, "source content is missing"));
            }
            Err(e) => return Err(PreviewError::Backend(e)),
        };

        let mime_owned = mime.to_string();
        let (max_width, max_height) = (self.max_width, self.max_height);
        let (img, data) = tokio::task::spawn_blocking(move || {
            let img = renderer.render(&source, &mime_owned, max_width, max_height)?;
            let data = sizing::encode(&img, OutputFormat::Png)?;
            Ok::<_, PreviewError>((img, data))
        })
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Thumbnail task panicked", e))??;

        self.provider.write(&path, data).await?;
        debug!(source = %file.storage_path, output = %path, "Generated max preview");

        Ok(img)
    }
}

/// Decode a stored preview off the async runtime; `None` if it is corrupt.
async fn decode_stored(data: Bytes) -> Result<Option<DynamicImage>, PreviewError> {
    let img = tokio::task::spawn_blocking(move || image::load_from_memory(&data).ok())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Thumbnail task panicked", e))?;
    Ok(img)
}
