//! GetSettingsHandler - the user's schedule, falling back to defaults.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::reminder::ReviewSettings;
use crate::ports::SettingsRepository;

pub struct GetSettingsHandler {
    settings: Arc<dyn SettingsRepository>,
}

impl GetSettingsHandler {
    pub fn new(settings: Arc<dyn SettingsRepository>) -> Self {
        Self { settings }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<ReviewSettings, DomainError> {
        Ok(self
            .settings
            .find_by_user(user_id)
            .await?
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{user, Harness};

    #[tokio::test]
    async fn unsaved_user_gets_defaults() {
        let h = Harness::new();

        let settings = GetSettingsHandler::new(h.settings.clone())
            .handle(&user())
            .await
            .unwrap();

        assert_eq!(settings, ReviewSettings::default());
    }
}
