//! Results of preview resolution.

use std::fmt;

use thiserror::Error;

use versionhub_core::error::{AppError, ErrorKind};
use versionhub_core::types::PreviewFile;

use super::validator::ValidationError;

/// Steps of resolving a preview request, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStage {
    ValidatingInput,
    ResolvingUserTree,
    ResolvingSourceFile,
    ResolvingVersion,
    RequestingPreview,
    Done,
}

impl ResolutionStage {
    /// Return the stage as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidatingInput => "validating_input",
            Self::ResolvingUserTree => "resolving_user_tree",
            Self::ResolvingSourceFile => "resolving_source_file",
            Self::ResolvingVersion => "resolving_version",
            Self::RequestingPreview => "requesting_preview",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for ResolutionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which lookup came up empty.
///
/// Only logged; every cause is reported outward as the same not-found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundCause {
    UserTree,
    SourceFile,
    Version,
    Preview,
}

impl NotFoundCause {
    /// Return the cause as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserTree => "user_tree",
            Self::SourceFile => "source_file",
            Self::Version => "version",
            Self::Preview => "preview",
        }
    }
}

impl fmt::Display for NotFoundCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal failure of a preview request.
#[derive(Debug, Error)]
pub enum PreviewRejection {
    /// The request parameters were invalid, or the preview provider refused them.
    #[error("bad request: {0}")]
    BadRequest(ValidationError),
    /// Something along the resolution chain does not exist.
    #[error("not found ({0})")]
    NotFound(NotFoundCause),
    /// The user tree refused access.
    #[error("forbidden: {0}")]
    Forbidden(String),
    /// A backend failed.
    #[error(transparent)]
    Internal(AppError),
}

impl From<ValidationError> for PreviewRejection {
    fn from(err: ValidationError) -> Self {
        Self::BadRequest(err)
    }
}

impl From<PreviewRejection> for AppError {
    fn from(rejection: PreviewRejection) -> Self {
        match rejection {
            PreviewRejection::BadRequest(err) => AppError::validation(err.to_string()),
            PreviewRejection::NotFound(cause) => {
                AppError::not_found(format!("Preview not found ({cause})"))
            }
            PreviewRejection::Forbidden(msg) => AppError::authorization(msg),
            PreviewRejection::Internal(err) => {
                let message = err.message.clone();
                AppError::with_source(ErrorKind::Internal, message, err)
            }
        }
    }
}

/// Successful result of a preview request.
#[derive(Debug, Clone)]
pub enum PreviewOutcome {
    /// The preview image.
    Preview(PreviewFile),
    /// No preview exists; the client should be sent to this mimetype icon.
    MimeIcon(String),
}
