//! Fixed-token session validator for tests and local runs without an
//! identity provider.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

#[derive(Debug, Default)]
struct Sessions {
    users: HashMap<String, AuthenticatedUser>,
    expired: HashSet<String>,
    outage: Option<String>,
}

/// Resolves registered tokens; anything else is `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    sessions: Mutex<Sessions>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `token` for `user_id` with a synthetic email. A blank id
    /// registers nothing.
    pub fn with_test_user(self, token: impl Into<String>, user_id: &str) -> Self {
        if let Ok(id) = UserId::new(user_id) {
            let user = AuthenticatedUser::new(id, format!("{user_id}@reviews.test"), None);
            self.edit(|s| {
                s.users.insert(token.into(), user);
            });
        }
        self
    }

    /// Every validation fails as if the provider were down.
    pub fn with_outage(self, reason: impl Into<String>) -> Self {
        self.edit(|s| s.outage = Some(reason.into()));
        self
    }

    pub fn end_outage(&self) {
        self.edit(|s| s.outage = None);
    }

    /// The token keeps resolving to `TokenExpired` from now on.
    pub fn expire(&self, token: &str) {
        self.edit(|s| {
            s.expired.insert(token.to_string());
        });
    }

    fn edit(&self, f: impl FnOnce(&mut Sessions)) {
        if let Ok(mut sessions) = self.sessions.lock() {
            f(&mut sessions);
        }
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let sessions = self
            .sessions
            .lock()
            .map_err(|_| AuthError::service_unavailable("session table poisoned"))?;

        if let Some(reason) = &sessions.outage {
            return Err(AuthError::service_unavailable(reason.clone()));
        }
        if sessions.expired.contains(token) {
            return Err(AuthError::TokenExpired);
        }
        sessions
            .users
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
