//! User file tree traits.

use async_trait::async_trait;

use crate::error::TreeError;
use crate::types::{FileNode, UserId};

/// Resolves the root folder of a user's file tree.
#[async_trait]
pub trait UserTree: Send + Sync + std::fmt::Debug + 'static {
    /// Return the files root of `user`.
    ///
    /// Fails with [`TreeError::NotFound`] when the user has no tree.
    async fn user_folder(&self, user: &UserId) -> Result<Box<dyn Folder>, TreeError>;
}

/// A folder inside a user's file tree.
#[async_trait]
pub trait Folder: Send + Sync + std::fmt::Debug {
    /// Look up the file at `path`, relative to this folder.
    ///
    /// Nested paths (`a/b/c.png`) are allowed. Entries that are not files
    /// are reported as [`TreeError::NotFound`].
    async fn get(&self, path: &str) -> Result<FileNode, TreeError>;
}
