//! Core type definitions used across the VersionHub workspace.

pub mod file;
pub mod id;
pub mod preview;

pub use file::FileNode;
pub use id::{IdParseError, UserId, VersionId};
pub use preview::{PreviewFile, PreviewMeta, PreviewMode, PreviewRequest};
