//! Mimetype icon lookup.

/// Maps a mimetype to the URL of a generic icon for it.
pub trait MimeIconProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Return the icon URL for `mime_type`, if one is known.
    fn mime_icon_url(&self, mime_type: &str) -> Option<String>;
}
