//! Streak repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::streak::Streak;

#[async_trait]
pub trait StreakRepository: Send + Sync {
    /// Returns `None` until the user's first completed review.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Streak>, DomainError>;

    /// Inserts or replaces the user's streak record.
    async fn save(&self, streak: &Streak) -> Result<(), DomainError>;
}
