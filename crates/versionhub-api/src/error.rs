//! Maps service errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use versionhub_core::error::{AppError, ErrorKind};
use versionhub_service::PreviewRejection;

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Optional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// An [`AppError`] answered with a JSON body.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// HTTP status and error code for an error kind.
pub fn status_for(kind: ErrorKind) -> (StatusCode, &'static str) {
    match kind {
        ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        ErrorKind::Authentication => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        ErrorKind::Authorization => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ErrorKind::Internal
        | ErrorKind::Storage
        | ErrorKind::Configuration
        | ErrorKind::Serialization => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, error_code) = status_for(err.kind);

        // Internal details stay in the log.
        let message = if status.is_server_error() {
            tracing::error!(error = %err, "Internal server error");
            "Internal server error".to_string()
        } else {
            err.message
        };

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message,
            details: None,
        };

        (status, Json(body)).into_response()
    }
}

/// A preview rejection, answered with its status and an empty body.
#[derive(Debug)]
pub struct PreviewFailure(pub PreviewRejection);

impl From<PreviewRejection> for PreviewFailure {
    fn from(rejection: PreviewRejection) -> Self {
        Self(rejection)
    }
}

impl PreviewFailure {
    /// HTTP status of the rejection.
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            PreviewRejection::BadRequest(_) => StatusCode::BAD_REQUEST,
            PreviewRejection::NotFound(_) => StatusCode::NOT_FOUND,
            PreviewRejection::Forbidden(_) => StatusCode::FORBIDDEN,
            PreviewRejection::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PreviewFailure {
    fn into_response(self) -> Response {
        self.status().into_response()
    }
}
