//! StartReviewHandler - opens this week's review, creating it on first use.

use std::sync::Arc;

use thiserror::Error;

use super::events::publish_review_events;
use crate::application::{PersistenceFailure, SavePolicy};
use crate::domain::calendar::week_info;
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::review::Review;
use crate::ports::{EventPublisher, ReviewRepository};

/// Command to open the review for the week containing `now`.
#[derive(Debug, Clone)]
pub struct StartReviewCommand {
    /// Owner of the review.
    pub user_id: UserId,
    /// Decides the week; also stamps `started_at` on a new review.
    pub now: Timestamp,
}

/// Result of opening the week's review.
#[derive(Debug, Clone)]
pub struct StartReviewResult {
    /// The new or existing review.
    pub review: Review,
    /// True when the week's review already existed.
    pub resumed: bool,
}

/// Error type for opening a review.
#[derive(Debug, Error)]
pub enum StartReviewError {
    /// The insert failed or timed out; safe to retry.
    #[error(transparent)]
    Persistence(#[from] PersistenceFailure),
    /// Lookup failed, or the week's row could not be read back.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Handler for opening this week's review.
///
/// Idempotent per user and week: a second call returns the stored review
/// with `resumed` set.
pub struct StartReviewHandler {
    reviews: Arc<dyn ReviewRepository>,
    publisher: Arc<dyn EventPublisher>,
    policy: SavePolicy,
}

impl StartReviewHandler {
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        publisher: Arc<dyn EventPublisher>,
        policy: SavePolicy,
    ) -> Self {
        Self {
            reviews,
            publisher,
            policy,
        }
    }

    pub async fn handle(&self, cmd: StartReviewCommand) -> Result<StartReviewResult, StartReviewError> {
        let week = week_info(cmd.now.date());

        if let Some(review) = self.reviews.find_by_week(&cmd.user_id, week.week_start).await? {
            return Ok(StartReviewResult {
                review,
                resumed: true,
            });
        }

        let mut review = Review::new(cmd.user_id.clone(), week);
        review.begin(cmd.now)?;
        let events = review.take_events();

        match self
            .policy
            .run("create_review", || self.reviews.create(&review))
            .await
        {
            Ok(()) => {}
            // Lost a race with another tab, or a timed-out attempt landed.
            Err(failure) if failure.last_error.code == ErrorCode::ReviewAlreadyExists => {
                let existing = self
                    .reviews
                    .find_by_week(&cmd.user_id, week.week_start)
                    .await?
                    .ok_or(failure)?;
                return Ok(StartReviewResult {
                    review: existing,
                    resumed: true,
                });
            }
            Err(failure) => return Err(failure.into()),
        }

        tracing::info!(
            user_id = %cmd.user_id,
            review_id = %review.id(),
            week_start = %week.week_start,
            "review started"
        );
        publish_review_events(self.publisher.as_ref(), events, &cmd.user_id).await;

        Ok(StartReviewResult {
            review,
            resumed: false,
        })
    }
}
