//! Unified application error types for VersionHub.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Collaborator boundaries (user tree,
//! version store, preview provider) additionally expose their own error
//! enums so callers can tell "not found" apart from "unavailable".

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested resource was not found.
    NotFound,
    /// The caller could not be identified.
    Authentication,
    /// The caller does not have permission to perform the action.
    Authorization,
    /// Input validation failed.
    Validation,
    /// An internal server error occurred.
    Internal,
    /// A storage I/O error occurred.
    Storage,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Authentication => write!(f, "AUTHENTICATION"),
            Self::Authorization => write!(f, "AUTHORIZATION"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::Storage => write!(f, "STORAGE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
        }
    }
}

/// The unified application error used throughout VersionHub.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    /// Create an authorization error.
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Storage, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Storage, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

/// Failure resolving a user's file tree or an entry inside it.
#[derive(Debug, Error)]
pub enum TreeError {
    /// The user root or the requested entry does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// The tree refused access to the requested entry.
    #[error("forbidden: {0}")]
    Forbidden(String),
    /// The backing storage failed.
    #[error(transparent)]
    Backend(#[from] AppError),
}

/// Failure resolving a stored version of a file.
#[derive(Debug, Error)]
pub enum VersionError {
    /// No stored version matches the token for this file.
    #[error("version '{version}' of '{path}' not found")]
    NotFound {
        /// Logical path of the source file.
        path: String,
        /// The version token as supplied by the caller.
        version: String,
    },
    /// The backing storage failed.
    #[error(transparent)]
    Backend(#[from] AppError),
}

/// Failure obtaining a preview for an artifact.
#[derive(Debug, Error)]
pub enum PreviewError {
    /// No renderer handles the mimetype, or the content could not be decoded.
    #[error("no preview available for '{mime}': {reason}")]
    Unavailable {
        /// The mimetype hint the preview was requested for.
        mime: String,
        /// Why the preview could not be produced.
        reason: String,
    },
    /// The request itself was not acceptable to the provider.
    #[error("invalid preview request: {0}")]
    InvalidArgument(String),
    /// The backing storage failed.
    #[error(transparent)]
    Backend(#[from] AppError),
}

impl PreviewError {
    /// Create an unavailable error.
    pub fn unavailable(mime: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            mime: mime.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind() {
        let err = AppError::not_found("File not found: a.txt");
        assert_eq!(err.to_string(), "NOT_FOUND: File not found: a.txt");
    }

    #[test]
    fn test_io_error_maps_to_storage() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: AppError = io.into();
        assert_eq!(err.kind, ErrorKind::Storage);
        assert!(err.source.is_some());
    }

    #[test]
    fn test_clone_drops_source() {
        let io = std::io::Error::other("boom");
        let err = AppError::with_source(ErrorKind::Internal, "wrapped", io);
        let cloned = err.clone();
        assert_eq!(cloned.kind, ErrorKind::Internal);
        assert!(cloned.source.is_none());
    }

    #[test]
    fn test_backend_errors_are_transparent() {
        let err = VersionError::from(AppError::storage("disk gone"));
        assert_eq!(err.to_string(), "STORAGE: disk gone");
    }
}
