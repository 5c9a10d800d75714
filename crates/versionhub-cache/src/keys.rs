//! Cache key builders for all VersionHub cache entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses.

use uuid::Uuid;

/// Prefix applied to all VersionHub cache keys.
const PREFIX: &str = "versionhub";

// ── Preview keys ───────────────────────────────────────────

/// Cache key for the stored preview metadata of one content variant.
pub fn preview_meta(content_id: Uuid, variant: &str) -> String {
    format!("{PREFIX}:preview:{content_id}:{variant}")
}
