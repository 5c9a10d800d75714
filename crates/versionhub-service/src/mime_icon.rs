//! Generic mimetype icons served when no preview exists.

use versionhub_core::traits::MimeIconProvider;

/// Maps mimetypes onto a fixed set of icons below a base URL.
#[derive(Debug, Clone)]
pub struct StaticMimeIconProvider {
    base_url: String,
}

impl StaticMimeIconProvider {
    /// Creates a provider serving icons from `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn icon_name(mime_type: &str) -> &'static str {
        let mime = mime_type.to_ascii_lowercase();
        match mime.as_str() {
            "application/pdf" => "application-pdf",
            "application/zip" | "application/gzip" | "application/x-tar" => "package-x-generic",
            "application/json" | "application/xml" | "application/javascript" => "text-code",
            _ => match mime.split_once('/').map(|(kind, _)| kind) {
                Some("image") => "image",
                Some("video") => "video",
                Some("audio") => "audio",
                Some("text") => "text",
                _ => "file",
            },
        }
    }
}

impl MimeIconProvider for StaticMimeIconProvider {
    fn mime_icon_url(&self, mime_type: &str) -> Option<String> {
        if mime_type.is_empty() {
            return None;
        }
        Some(format!("{}/{}.svg", self.base_url, Self::icon_name(mime_type)))
    }
}
