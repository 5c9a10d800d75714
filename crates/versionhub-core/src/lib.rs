//! # versionhub-core
//!
//! Core crate for VersionHub. Contains the collaborator traits (storage,
//! cache, user tree, version store, preview provider), configuration
//! schemas, domain value types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other VersionHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
