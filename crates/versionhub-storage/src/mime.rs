//! Extension-based mimetype detection.

/// Fallback for content without a recognised extension.
pub const DEFAULT_MIME: &str = "application/octet-stream";

/// Guess the MIME type of `path` from its extension.
pub fn mime_or_default(path: &str) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(DEFAULT_MIME)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_detection() {
        assert_eq!(mime_or_default("file.pdf"), "application/pdf");
        assert_eq!(mime_or_default("img.PNG"), "image/png");
        assert_eq!(mime_or_default("dir/photo.jpeg"), "image/jpeg");
        assert_eq!(mime_or_default("notes.txt"), "text/plain");
        assert_eq!(mime_or_default("noext"), DEFAULT_MIME);
    }

    #[test]
    fn test_less_common_image_types() {
        assert_eq!(mime_or_default("scan.tiff"), "image/tiff");
        assert_eq!(mime_or_default("favicon.ico"), "image/x-icon");
    }

    #[test]
    fn test_dot_in_directory_is_ignored() {
        assert_eq!(mime_or_default("v1.2/README"), DEFAULT_MIME);
    }
}
