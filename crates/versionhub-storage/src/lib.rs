//! # versionhub-storage
//!
//! Storage-side collaborators for VersionHub, all backed by a
//! [`StorageProvider`](versionhub_core::traits::StorageProvider):
//!
//! - [`providers`]: the local filesystem provider
//! - [`tree`]: users' live file trees
//! - [`versions`]: the timestamp-keyed version store
//! - [`thumbnail`]: the preview cache and its renderers

pub mod mime;
pub mod providers;
pub mod thumbnail;
pub mod tree;
pub mod versions;

pub use providers::LocalStorageProvider;
pub use thumbnail::ThumbnailCache;
pub use tree::LocalUserTree;
pub use versions::LocalVersionStore;
