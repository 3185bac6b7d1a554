//! Review settings repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::reminder::ReviewSettings;

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Returns `None` when the user never changed the defaults.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<ReviewSettings>, DomainError>;

    async fn save(&self, user_id: &UserId, settings: &ReviewSettings) -> Result<(), DomainError>;
}
