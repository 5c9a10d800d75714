//! Version store reading `<user>/files_versions/<path>.v<timestamp>`.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use versionhub_core::error::{ErrorKind, VersionError};
use versionhub_core::traits::storage::StorageProvider;
use versionhub_core::traits::version::VersionStore;
use versionhub_core::types::{FileNode, UserId, VersionId};

use crate::mime::mime_or_default;

/// Directory holding a user's version history, relative to the user's directory.
pub const VERSIONS_DIR: &str = "files_versions";

/// Version store over a storage provider.
///
/// Each version of `<path>` is a plain copy of the content stored next to
/// its siblings as `<path>.v<timestamp>`.
#[derive(Debug, Clone)]
pub struct LocalVersionStore {
    /// Provider holding every user's directory.
    provider: Arc<dyn StorageProvider>,
}

impl LocalVersionStore {
    /// Create a version store over `provider`.
    pub fn new(provider: Arc<dyn StorageProvider>) -> Self {
        Self { provider }
    }

    /// Storage path of version `version` of `path` for `user`.
    pub fn version_path(user: &UserId, path: &str, version: VersionId) -> String {
        format!("{user}/{VERSIONS_DIR}/{path}.v{version}")
    }
}

#[async_trait]
impl VersionStore for LocalVersionStore {
    async fn get_version_file(
        &self,
        user: &UserId,
        source: &FileNode,
        version: &str,
    ) -> Result<FileNode, VersionError> {
        let not_found = || VersionError::NotFound {
            path: source.path.clone(),
            version: version.to_string(),
        };

        let Ok(version_id) = version.parse::<VersionId>() else {
            debug!(path = %source.path, version, "Version token is not a timestamp");
            return Err(not_found());
        };
        let modified_at = version_id.to_datetime().ok_or_else(not_found)?;

        let storage_path = Self::version_path(user, &source.path, version_id);
        let meta = match self.provider.metadata(&storage_path).await {
            Ok(meta) if !meta.is_directory => meta,
            Ok(_) => return Err(not_found()),
            Err(e) if e.kind == ErrorKind::NotFound => return Err(not_found()),
            Err(e) => return Err(VersionError::Backend(e)),
        };

        debug!(
            user = %user,
            path = %source.path,
            version = %version_id,
            "Resolved file version"
        );

        Ok(FileNode::new(
            source.path.clone(),
            storage_path,
            mime_or_default(&source.path),
            meta.size_bytes,
            modified_at,
        ))
    }
}
