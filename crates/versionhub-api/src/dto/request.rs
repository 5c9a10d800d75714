//! Request DTOs.

use serde::{Deserialize, Deserializer, Serialize, de};

/// Query parameters of `GET /api/versions/preview`.
///
/// Missing sizes fall back to the configured defaults; a missing version
/// selects the live file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewParams {
    /// Path of the file inside the caller's tree.
    #[serde(default)]
    pub file: String,
    /// Preview width.
    pub x: Option<i64>,
    /// Preview height.
    pub y: Option<i64>,
    /// Version timestamp.
    #[serde(default)]
    pub version: String,
    /// Redirect to a mimetype icon when no preview exists.
    #[serde(default, deserialize_with = "flag")]
    pub mime_fallback: bool,
}

/// Accepts `true`/`false`, `1`/`0`, and an empty value as false.
fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let raw = String::deserialize(deserializer)?;
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" | "" => Ok(false),
        _ => Err(de::Error::invalid_value(
            de::Unexpected::Str(&raw),
            &"a boolean flag",
        )),
    }
}
