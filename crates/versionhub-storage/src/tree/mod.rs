//! Users' live file trees.

pub mod local;
pub mod path;

pub use local::{LocalFolder, LocalUserTree};
