//! Version store trait.

use async_trait::async_trait;

use crate::error::VersionError;
use crate::types::{FileNode, UserId};

/// Read access to the version history of users' files.
#[async_trait]
pub trait VersionStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the stored version `version` of `source`.
    ///
    /// The returned node carries the content and mimetype captured with that
    /// version. Any token that does not name a stored version, including
    /// tokens that are not timestamps at all, yields
    /// [`VersionError::NotFound`].
    async fn get_version_file(
        &self,
        user: &UserId,
        source: &FileNode,
        version: &str,
    ) -> Result<FileNode, VersionError>;
}
