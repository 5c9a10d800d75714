//! Preview provider trait.

use async_trait::async_trait;

use crate::error::PreviewError;
use crate::types::{PreviewFile, PreviewRequest};

/// Produces previews, reusing stored ones when possible.
#[async_trait]
pub trait PreviewProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Return a preview for `request.file`, rendering it if none is stored.
    async fn get_preview(&self, request: &PreviewRequest) -> Result<PreviewFile, PreviewError>;
}
