//! Preview rendering and the stored-preview cache.

pub mod cache;
pub mod generator;
mod locks;
pub mod renderer;
pub mod sizing;

pub use cache::{PREVIEW_DIR, ThumbnailCache};
pub use generator::ThumbnailGenerator;
pub use renderer::{ImageRenderer, Renderer, RendererRegistry};
