//! Who is making the request.
//!
//! The `SessionValidator` port turns a session token into an
//! `AuthenticatedUser`; handlers never see the token itself.

use thiserror::Error;

use super::UserId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub email: String,
    pub display_name: Option<String>,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, email: impl Into<String>, display_name: Option<String>) -> Self {
        Self {
            id,
            email: email.into(),
            display_name,
        }
    }
}

/// Why a token did not resolve to a user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("invalid session token")]
    InvalidToken,

    #[error("session expired")]
    TokenExpired,

    /// The validator itself is down; the caller may be signed in.
    #[error("session check unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// True when the token is bad, as opposed to the check failing.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::ServiceUnavailable(_))
    }
}
