//! Preview dimension policy, resizing, and encoding.

use bytes::Bytes;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};

use versionhub_core::error::{AppError, ErrorKind};
use versionhub_core::result::AppResult;
use versionhub_core::types::PreviewMode;

/// Encoding of stored previews.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// PNG, used for everything that is not a JPEG.
    Png,
    /// JPEG, used for JPEG sources.
    Jpeg,
}

impl OutputFormat {
    /// Pick the preview format for a source mimetype.
    pub fn for_mime(mime: &str) -> Self {
        if mime.eq_ignore_ascii_case("image/jpeg") {
            Self::Jpeg
        } else {
            Self::Png
        }
    }

    /// MIME type of previews in this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    /// File extension of previews in this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }

    fn image_format(&self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
        }
    }
}

/// Stored file name of a sized preview variant, e.g. `32-32-crop.png`.
pub fn variant_name(
    width: u32,
    height: u32,
    crop: bool,
    mode: PreviewMode,
    format: OutputFormat,
) -> String {
    let mut name = format!("{width}-{height}");
    if crop {
        name.push_str("-crop");
    }
    if mode == PreviewMode::Cover {
        name.push_str("-cover");
    }
    name.push('.');
    name.push_str(format.extension());
    name
}

/// Output dimensions for a `source_width` x `source_height` image requested
/// at `width` x `height`.
///
/// Cropping always yields exactly the requested size. Otherwise the aspect
/// ratio is kept: `Fill` fits inside the box, `Cover` covers it.
pub fn target_dimensions(
    source_width: u32,
    source_height: u32,
    width: u32,
    height: u32,
    crop: bool,
    mode: PreviewMode,
) -> (u32, u32) {
    if crop || source_width == 0 || source_height == 0 {
        return (width, height);
    }

    let scale_x = f64::from(width) / f64::from(source_width);
    let scale_y = f64::from(height) / f64::from(source_height);
    let scale = match mode {
        PreviewMode::Fill => scale_x.min(scale_y),
        PreviewMode::Cover => scale_x.max(scale_y),
    };

    let scaled = |side: u32| ((f64::from(side) * scale).round() as u32).max(1);
    (scaled(source_width), scaled(source_height))
}

/// Resize `img` for a request of `width` x `height`.
pub fn resize(
    img: &DynamicImage,
    width: u32,
    height: u32,
    crop: bool,
    mode: PreviewMode,
) -> DynamicImage {
    if crop {
        return img.resize_to_fill(width, height, FilterType::Triangle);
    }
    let (w, h) = target_dimensions(img.width(), img.height(), width, height, crop, mode);
    img.resize_exact(w, h, FilterType::Triangle)
}

/// Encode `img` in `format`.
pub fn encode(img: &DynamicImage, format: OutputFormat) -> AppResult<Bytes> {
    let mut buf = std::io::Cursor::new(Vec::new());
    let result = match format {
        // JPEG has no alpha channel.
        OutputFormat::Jpeg => {
            DynamicImage::ImageRgb8(img.to_rgb8()).write_to(&mut buf, format.image_format())
        }
        OutputFormat::Png => img.write_to(&mut buf, format.image_format()),
    };
    result.map_err(|e| {
        AppError::with_source(ErrorKind::Internal, "Failed to encode preview", e)
    })?;
    Ok(Bytes::from(buf.into_inner()))
}
