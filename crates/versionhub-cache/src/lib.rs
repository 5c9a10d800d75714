//! # versionhub-cache
//!
//! Cache provider implementation for VersionHub, an in-process cache using
//! [moka](https://crates.io/crates/moka) with per-entry TTLs.
//!
//! The preview cache keeps its index of stored previews here so repeated
//! requests skip the storage metadata lookups.

pub mod keys;
pub mod memory;
pub mod provider;

pub use provider::CacheManager;
