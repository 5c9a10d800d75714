//! Request context carrying the calling user.

use versionhub_core::types::UserId;

/// Context for the current request.
///
/// Built by the HTTP layer from the trusted identity header and passed into
/// service methods, so every operation knows *who* is acting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// The calling user.
    pub user: UserId,
    /// IP address of the request origin, if known.
    pub ip_address: Option<String>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user: UserId, ip_address: Option<String>) -> Self {
        Self { user, ip_address }
    }

    /// Creates a context carrying only the user.
    pub fn for_user(user: UserId) -> Self {
        Self::new(user, None)
    }

    /// Origin address for log fields, `-` when unknown.
    pub fn origin(&self) -> &str {
        self.ip_address.as_deref().unwrap_or("-")
    }
}
