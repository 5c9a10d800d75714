//! Version history lookup.

pub mod local;

pub use local::LocalVersionStore;
