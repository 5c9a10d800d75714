//! Preview generation configuration.

use serde::{Deserialize, Serialize};

/// Preview generation and serving settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Whether previews are generated at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Largest preview width ever rendered; requests are clamped to it.
    #[serde(default = "default_max_dimension")]
    pub max_width: u32,
    /// Largest preview height ever rendered; requests are clamped to it.
    #[serde(default = "default_max_dimension")]
    pub max_height: u32,
    /// Width used when a request does not specify one.
    #[serde(default = "default_dimension")]
    pub default_width: i64,
    /// Height used when a request does not specify one.
    #[serde(default = "default_dimension")]
    pub default_height: i64,
    /// Base URL of the generic mimetype icons.
    #[serde(default = "default_mime_icon_base_url")]
    pub mime_icon_base_url: String,
    /// How long clients may cache a served preview, in seconds.
    #[serde(default = "default_client_cache")]
    pub client_cache_seconds: u64,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_width: default_max_dimension(),
            max_height: default_max_dimension(),
            default_width: default_dimension(),
            default_height: default_dimension(),
            mime_icon_base_url: default_mime_icon_base_url(),
            client_cache_seconds: default_client_cache(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_dimension() -> u32 {
    4096
}

fn default_dimension() -> i64 {
    32
}

fn default_mime_icon_base_url() -> String {
    "/core/img/filetypes".to_string()
}

fn default_client_cache() -> u64 {
    86400
}
