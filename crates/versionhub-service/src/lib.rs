//! # versionhub-service
//!
//! Service layer for VersionHub. The preview resolution service ties the
//! user tree, the version store and the preview provider together behind a
//! single request contract, and maps every failure to a distinct rejection.
//!
//! Services follow constructor injection: all collaborators are provided
//! at construction time as `Arc<dyn Trait>` references.

pub mod context;
pub mod mime_icon;
pub mod preview;

pub use context::RequestContext;
pub use mime_icon::StaticMimeIconProvider;
pub use preview::{
    PreviewOutcome, PreviewQuery, PreviewRejection, PreviewResolutionService, RequestValidator,
};
