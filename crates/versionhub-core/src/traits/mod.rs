//! Core traits defined in `versionhub-core` and implemented by other crates.

pub mod cache;
pub mod mime_icon;
pub mod preview;
pub mod storage;
pub mod tree;
pub mod version;

pub use cache::CacheProvider;
pub use mime_icon::MimeIconProvider;
pub use preview::PreviewProvider;
pub use storage::{StorageObjectMeta, StorageProvider};
pub use tree::{Folder, UserTree};
pub use version::VersionStore;
