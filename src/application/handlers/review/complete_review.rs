//! CompleteReviewHandler - saves the reflection, completes the review, and
//! updates the user's streak.

use std::sync::Arc;

use thiserror::Error;

use super::events::publish_review_events;
use super::find_owned_review;
use crate::application::{PersistenceFailure, SavePolicy};
use crate::domain::foundation::{DomainError, ReviewId, Timestamp, UserId};
use crate::domain::review::{validate_step, FieldIssue, Reflection, Review, ReviewStep, StepPayload};
use crate::domain::streak::{CompletionOutcome, Streak};
use crate::ports::{EventPublisher, ReviewRepository, StreakRepository};

/// Command to finish a review with its step 5 answers.
#[derive(Debug, Clone)]
pub struct CompleteReviewCommand {
    /// Must own the review.
    pub user_id: UserId,
    /// Review to complete; must have reached step 5.
    pub review_id: ReviewId,
    /// Step 5 answers.
    pub reflection: Reflection,
    /// Wizard session timer at completion.
    pub time_spent_seconds: u64,
    /// Stamped as `completed_at`.
    pub now: Timestamp,
}

/// Result of a completion.
#[derive(Debug, Clone)]
pub struct CompleteReviewResult {
    /// The completed review.
    pub review: Review,
    /// Streak figures and milestone for the completion screen.
    pub outcome: CompletionOutcome,
}

/// Error type for completing a review.
#[derive(Debug, Error)]
pub enum CompleteReviewError {
    #[error("Review not found: {0}")]
    NotFound(ReviewId),
    #[error("{step} is incomplete")]
    Invalid {
        step: ReviewStep,
        issues: Vec<FieldIssue>,
    },
    #[error(transparent)]
    Persistence(#[from] PersistenceFailure),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

pub struct CompleteReviewHandler {
    reviews: Arc<dyn ReviewRepository>,
    streaks: Arc<dyn StreakRepository>,
    publisher: Arc<dyn EventPublisher>,
    policy: SavePolicy,
}

impl CompleteReviewHandler {
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        streaks: Arc<dyn StreakRepository>,
        publisher: Arc<dyn EventPublisher>,
        policy: SavePolicy,
    ) -> Self {
        Self {
            reviews,
            streaks,
            publisher,
            policy,
        }
    }

    pub async fn handle(
        &self,
        cmd: CompleteReviewCommand,
    ) -> Result<CompleteReviewResult, CompleteReviewError> {
        let payload = StepPayload::Reflect(cmd.reflection);
        let validation = validate_step(&payload);
        if !validation.is_valid() {
            return Err(CompleteReviewError::Invalid {
                step: ReviewStep::Reflect,
                issues: validation.issues,
            });
        }

        let mut review = find_owned_review(self.reviews.as_ref(), &cmd.user_id, &cmd.review_id)
            .await?
            .ok_or(CompleteReviewError::NotFound(cmd.review_id))?;

        // A retry after a completion that landed but whose response was lost.
        if review.is_completed() {
            let outcome = self.replay_outcome(&review, cmd.now).await?;
            return Ok(CompleteReviewResult { review, outcome });
        }

        review.apply_saved_step(payload)?;
        review.complete(cmd.now, cmd.time_spent_seconds)?;
        let events = review.take_events();

        self.policy
            .run("complete_review", || self.reviews.complete_review(&review))
            .await?;

        let outcome = self.update_streak(&review, cmd.now).await;
        tracing::info!(
            user_id = %cmd.user_id,
            review_id = %review.id(),
            week_number = review.week().week_number,
            time_spent_seconds = cmd.time_spent_seconds,
            current_streak = outcome.current_streak,
            "review completed"
        );
        publish_review_events(self.publisher.as_ref(), events, &cmd.user_id).await;

        Ok(CompleteReviewResult { review, outcome })
    }

    /// Rebuilds the streak from every completed week, keeping the stored
    /// longest streak as a floor. A failed streak write never fails the
    /// completion itself.
    async fn update_streak(&self, review: &Review, now: Timestamp) -> CompletionOutcome {
        let user_id = review.user_id();
        let week = review.week();

        let stored = match self.streaks.find_by_user(user_id).await {
            Ok(stored) => stored,
            Err(error) => {
                tracing::warn!(user_id = %user_id, error = %error, "could not load streak");
                None
            }
        };
        let previous_longest = stored.as_ref().map_or(0, |s| s.longest_streak);

        let mut streak = match self.reviews.list_completed_weeks(user_id).await {
            Ok(weeks) => Streak::rebuild(user_id.clone(), weeks, now.date()),
            Err(error) => {
                tracing::warn!(user_id = %user_id, error = %error, "could not list completed weeks");
                let mut streak = stored.unwrap_or_else(|| Streak::new(user_id.clone()));
                streak.record_completion(week.week_start);
                streak
            }
        };
        streak.longest_streak = streak.longest_streak.max(previous_longest);

        if let Err(failure) = self
            .policy
            .run("save_streak", || self.streaks.save(&streak))
            .await
        {
            tracing::warn!(user_id = %user_id, error = %failure, "streak not saved");
        }

        CompletionOutcome::new(week.week_number, previous_longest, &streak)
    }

    async fn replay_outcome(
        &self,
        review: &Review,
        now: Timestamp,
    ) -> Result<CompletionOutcome, DomainError> {
        let streak = match self.streaks.find_by_user(review.user_id()).await? {
            Some(streak) if streak.has_completed(review.week().week_start) => streak,
            _ => return Ok(self.update_streak(review, now).await),
        };
        Ok(CompletionOutcome::new(
            review.week().week_number,
            streak.longest_streak,
            &streak,
        ))
    }
}
