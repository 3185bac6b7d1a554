//! Review repository port.
//!
//! Storage boundary for review records. Domain rules are applied by the
//! `Review` aggregate before any of these calls; adapters persist what the
//! aggregate says.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, ReviewId, UserId};
use crate::domain::review::{Review, ReviewStep};

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Inserts a new review.
    ///
    /// # Errors
    ///
    /// - `ReviewAlreadyExists` if the user already has a review for that week
    /// - `DatabaseError` on persistence failure
    async fn create(&self, review: &Review) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, DomainError>;

    /// Loads the user's review for the week starting on `week_start`.
    async fn find_by_week(
        &self,
        user_id: &UserId,
        week_start: NaiveDate,
    ) -> Result<Option<Review>, DomainError>;

    /// Persists one step's payload together with the review's furthest
    /// step. Writing the same state twice leaves storage unchanged.
    ///
    /// # Errors
    ///
    /// - `ReviewNotFound` if the review was never created
    /// - `DatabaseError` / `StorageTimeout` on persistence failure
    async fn save_step_payload(&self, review: &Review, step: ReviewStep) -> Result<(), DomainError>;

    /// Persists the completion: final payload, `completed_at`, and time spent.
    async fn complete_review(&self, review: &Review) -> Result<(), DomainError>;

    /// Week starts of the user's completed reviews, oldest first.
    async fn list_completed_weeks(&self, user_id: &UserId) -> Result<Vec<NaiveDate>, DomainError>;

    /// All of the user's reviews, newest week first.
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Review>, DomainError>;
}
