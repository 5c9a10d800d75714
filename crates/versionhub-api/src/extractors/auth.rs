//! `AuthUser` extractor: reads the caller's identity from the header set by
//! the upstream authentication proxy.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use versionhub_core::error::AppError;
use versionhub_core::types::UserId;
use versionhub_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted caller context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = state.config.server.user_header.as_str();
        let raw = parts
            .headers
            .get(header)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication(format!("Missing {header} header")))?;

        let user = UserId::parse(raw.trim())
            .map_err(|e| AppError::authentication(format!("Invalid user identity: {e}")))?;

        let ip_address = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_string());

        Ok(AuthUser(RequestContext::new(user, ip_address)))
    }
}
