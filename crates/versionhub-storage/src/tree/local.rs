//! User file trees laid out on a storage provider.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use versionhub_core::error::{ErrorKind, TreeError};
use versionhub_core::traits::storage::StorageProvider;
use versionhub_core::traits::tree::{Folder, UserTree};
use versionhub_core::types::{FileNode, UserId};

use super::path::normalize;
use crate::mime::mime_or_default;

/// Directory holding a user's live files, relative to the user's directory.
pub const FILES_DIR: &str = "files";

/// Resolves `<user>/files` on the storage provider.
#[derive(Debug, Clone)]
pub struct LocalUserTree {
    /// Provider holding every user's directory.
    provider: Arc<dyn StorageProvider>,
}

impl LocalUserTree {
    /// Create a user tree over `provider`.
    pub fn new(provider: Arc<dyn StorageProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl UserTree for LocalUserTree {
    async fn user_folder(&self, user: &UserId) -> Result<Box<dyn Folder>, TreeError> {
        let root = format!("{user}/{FILES_DIR}");

        match self.provider.metadata(&root).await {
            Ok(meta) if meta.is_directory => {}
            Ok(_) => return Err(TreeError::NotFound(format!("files of user {user}"))),
            Err(e) if e.kind == ErrorKind::NotFound => {
                return Err(TreeError::NotFound(format!("files of user {user}")));
            }
            Err(e) => return Err(TreeError::Backend(e)),
        }

        Ok(Box::new(LocalFolder {
            provider: Arc::clone(&self.provider),
            root,
        }))
    }
}

/// A folder of a user tree, addressed by its storage path.
#[derive(Debug, Clone)]
pub struct LocalFolder {
    /// Provider holding the folder.
    provider: Arc<dyn StorageProvider>,
    /// Storage path of the folder.
    root: String,
}

#[async_trait]
impl Folder for LocalFolder {
    async fn get(&self, path: &str) -> Result<FileNode, TreeError> {
        let relative = normalize(path)?;
        if relative.is_empty() {
            return Err(TreeError::NotFound(format!("not a file: {path}")));
        }

        let storage_path = format!("{}/{}", self.root, relative);
        let meta = match self.provider.metadata(&storage_path).await {
            Ok(meta) => meta,
            Err(e) if e.kind == ErrorKind::NotFound => {
                return Err(TreeError::NotFound(relative));
            }
            Err(e) => return Err(TreeError::Backend(e)),
        };

        if meta.is_directory {
            return Err(TreeError::NotFound(format!("not a file: {relative}")));
        }

        debug!(path = %relative, storage_path = %storage_path, "Resolved file in user tree");

        let mime_type = mime_or_default(&relative);
        Ok(FileNode::new(
            relative,
            storage_path,
            mime_type,
            meta.size_bytes,
            meta.last_modified.unwrap_or_default(),
        ))
    }
}
