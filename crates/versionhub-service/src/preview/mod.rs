//! Preview resolution for live files and their stored versions.

pub mod outcome;
pub mod service;
pub mod validator;

pub use outcome::{NotFoundCause, PreviewOutcome, PreviewRejection, ResolutionStage};
pub use service::{PreviewQuery, PreviewResolutionService};
pub use validator::{RequestValidator, ValidatedRequest, ValidationError};
