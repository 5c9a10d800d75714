//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field has a default so an empty file is valid.

pub mod app;
pub mod cache;
pub mod logging;
pub mod preview;
pub mod storage;

use serde::{Deserialize, Serialize};

use self::app::ServerConfig;
use self::cache::CacheConfig;
use self::logging::LoggingConfig;
use self::preview::PreviewConfig;
use self::storage::StorageConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// File storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Preview generation settings.
    #[serde(default)]
    pub preview: PreviewConfig,
    /// Cache provider settings.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `VERSIONHUB__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("VERSIONHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from a TOML string, without file or environment
    /// overlays.
    pub fn from_toml(source: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_source_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.user_header, "x-user-id");
        assert_eq!(config.storage.data_root, "./data");
        assert_eq!(config.preview.default_width, 32);
        assert_eq!(config.preview.default_height, 32);
        assert_eq!(config.preview.max_width, 4096);
        assert!(config.preview.enabled);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            port = 9000

            [storage]
            data_root = "/srv/versionhub"

            [preview]
            max_width = 1024
            enabled = false
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.storage.data_root, "/srv/versionhub");
        assert_eq!(config.preview.max_width, 1024);
        assert_eq!(config.preview.max_height, 4096);
        assert!(!config.preview.enabled);
    }

    #[test]
    fn test_invalid_value_is_configuration_error() {
        let err = AppConfig::from_toml("[server]\nport = \"not a port\"").unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
    }
}
