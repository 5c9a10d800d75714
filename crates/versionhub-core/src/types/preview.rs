//! Preview request and result value objects.

use std::fmt;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::file::FileNode;

/// How a preview is scaled into the requested box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewMode {
    /// Fit inside the box (or fill it exactly when cropping).
    #[default]
    Fill,
    /// Scale until the box is fully covered, keeping the aspect ratio.
    Cover,
}

impl PreviewMode {
    /// Return the mode as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fill => "fill",
            Self::Cover => "cover",
        }
    }
}

impl fmt::Display for PreviewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request for a preview of one artifact at one size.
///
/// Built fresh per request; the preview provider never sees whether the
/// artifact is a live file or a version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRequest {
    /// The artifact to preview.
    pub file: FileNode,
    /// Requested width in pixels (always > 0).
    pub width: u32,
    /// Requested height in pixels (always > 0).
    pub height: u32,
    /// Whether to crop to exactly `width` x `height`.
    pub crop: bool,
    /// Scaling mode.
    pub mode: PreviewMode,
    /// MIME type used to pick a renderer.
    pub mime_hint: String,
}

impl PreviewRequest {
    /// Create a preview request.
    pub fn new(
        file: FileNode,
        width: u32,
        height: u32,
        crop: bool,
        mode: PreviewMode,
        mime_hint: impl Into<String>,
    ) -> Self {
        Self {
            file,
            width,
            height,
            crop,
            mode,
            mime_hint: mime_hint.into(),
        }
    }
}

/// Metadata identifying a stored preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewMeta {
    /// Stored preview file name.
    pub name: String,
    /// Preview image MIME type.
    pub mime_type: String,
    /// When the preview was written.
    pub modified_at: DateTime<Utc>,
}

/// A rendered preview image.
#[derive(Debug, Clone)]
pub struct PreviewFile {
    /// Stored preview file name.
    pub name: String,
    /// Preview image MIME type.
    pub mime_type: String,
    /// When the preview was written.
    pub modified_at: DateTime<Utc>,
    /// Encoded image bytes.
    pub data: Bytes,
}

impl PreviewFile {
    /// Combine stored metadata with its bytes.
    pub fn from_meta(meta: PreviewMeta, data: Bytes) -> Self {
        Self {
            name: meta.name,
            mime_type: meta.mime_type,
            modified_at: meta.modified_at,
            data,
        }
    }

    /// Return the metadata part of this preview.
    pub fn meta(&self) -> PreviewMeta {
        PreviewMeta {
            name: self.name.clone(),
            mime_type: self.mime_type.clone(),
            modified_at: self.modified_at,
        }
    }
}
