//! Mimetype-keyed renderers turning file content into a raster image.

use std::fmt;
use std::sync::Arc;

use image::DynamicImage;

use versionhub_core::error::PreviewError;

/// Turns raw file content into an image no larger than the given bounds.
pub trait Renderer: Send + Sync + fmt::Debug {
    /// Render `data` (of type `mime`) to an image fitting in
    /// `max_width` x `max_height`.
    fn render(
        &self,
        data: &[u8],
        mime: &str,
        max_width: u32,
        max_height: u32,
    ) -> Result<DynamicImage, PreviewError>;
}

/// Renders raster images the `image` crate can decode.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageRenderer;

impl ImageRenderer {
    /// Mimetypes this renderer is registered for by default.
    pub const MIME_TYPES: [&'static str; 5] = [
        "image/jpeg",
        "image/png",
        "image/gif",
        "image/webp",
        "image/bmp",
    ];
}

impl Renderer for ImageRenderer {
    fn render(
        &self,
        data: &[u8],
        mime: &str,
        max_width: u32,
        max_height: u32,
    ) -> Result<DynamicImage, PreviewError> {
        if data.is_empty() {
            return Err(PreviewError::unavailable(mime, "empty image data"));
        }

        let img = image::load_from_memory(data).map_err(|e| {
            PreviewError::unavailable(mime, format!("failed to decode image: {e}"))
        })?;

        if img.width() > max_width || img.height() > max_height {
            Ok(img.thumbnail(max_width, max_height))
        } else {
            Ok(img)
        }
    }
}

/// Ordered list of (mimetype pattern, renderer) pairs.
///
/// A pattern is either an exact mimetype (`image/png`) or a whole top-level
/// type (`image/*`). The first registered match wins.
#[derive(Debug, Clone, Default)]
pub struct RendererRegistry {
    entries: Vec<(String, Arc<dyn Renderer>)>,
}

impl RendererRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in image renderer.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        let image: Arc<dyn Renderer> = Arc::new(ImageRenderer);
        for mime in ImageRenderer::MIME_TYPES {
            registry.register(mime, Arc::clone(&image));
        }
        registry
    }

    /// Register `renderer` for mimetypes matching `pattern`.
    pub fn register(&mut self, pattern: impl Into<String>, renderer: Arc<dyn Renderer>) {
        self.entries.push((pattern.into().to_lowercase(), renderer));
    }

    /// Find the renderer for `mime`.
    pub fn find(&self, mime: &str) -> Option<Arc<dyn Renderer>> {
        let mime = mime.to_lowercase();
        self.entries
            .iter()
            .find(|(pattern, _)| pattern_matches(pattern, &mime))
            .map(|(_, renderer)| Arc::clone(renderer))
    }

    /// Whether any renderer handles `mime`.
    pub fn is_supported(&self, mime: &str) -> bool {
        self.find(mime).is_some()
    }
}

fn pattern_matches(pattern: &str, mime: &str) -> bool {
    match pattern.strip_suffix("/*") {
        Some(top_level) => mime
            .split_once('/')
            .is_some_and(|(kind, _)| kind == top_level),
        None => pattern == mime,
    }
}
