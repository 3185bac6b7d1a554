//! Inbound identity port used by the HTTP auth middleware.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Resolves a raw session token (no `Bearer ` prefix) to its user.
///
/// Bad signatures and malformed tokens are `InvalidToken`, stale ones
/// `TokenExpired`. `ServiceUnavailable` is reserved for the validator
/// itself failing, since the middleware answers that with a 503 rather
/// than a login redirect.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
