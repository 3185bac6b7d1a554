//! UpdateSettingsHandler - validates and stores the user's schedule.

use std::sync::Arc;

use thiserror::Error;

use crate::application::{PersistenceFailure, SavePolicy};
use crate::domain::foundation::{UserId, ValidationError};
use crate::domain::reminder::ReviewSettings;
use crate::ports::SettingsRepository;

/// Command to replace a user's review schedule.
#[derive(Debug, Clone)]
pub struct UpdateSettingsCommand {
    /// Whose settings.
    pub user_id: UserId,
    /// Full replacement; validated before it is stored.
    pub settings: ReviewSettings,
}

/// Error type for settings updates.
#[derive(Debug, Error)]
pub enum UpdateSettingsError {
    /// Day, time or timezone out of range.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Persistence(#[from] PersistenceFailure),
}

pub struct UpdateSettingsHandler {
    settings: Arc<dyn SettingsRepository>,
    policy: SavePolicy,
}

impl UpdateSettingsHandler {
    pub fn new(settings: Arc<dyn SettingsRepository>, policy: SavePolicy) -> Self {
        Self { settings, policy }
    }

    pub async fn handle(
        &self,
        cmd: UpdateSettingsCommand,
    ) -> Result<ReviewSettings, UpdateSettingsError> {
        cmd.settings.validate()?;
        self.policy
            .run("save_settings", || {
                self.settings.save(&cmd.user_id, &cmd.settings)
            })
            .await?;
        tracing::info!(
            user_id = %cmd.user_id,
            review_day = cmd.settings.review_day,
            "review settings updated"
        );
        Ok(cmd.settings)
    }
}
