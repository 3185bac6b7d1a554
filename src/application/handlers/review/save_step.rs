//! SaveStepHandler - persists one step of an in-progress review.

use std::sync::Arc;

use thiserror::Error;

use super::events::publish_review_events;
use super::find_owned_review;
use crate::application::{PersistenceFailure, SavePolicy};
use crate::domain::foundation::{DomainError, ReviewId, UserId};
use crate::domain::review::{validate_step, FieldIssue, Review, ReviewStep, StepPayload};
use crate::ports::{EventPublisher, ReviewRepository};

/// Command to save one step's answers.
#[derive(Debug, Clone)]
pub struct SaveStepCommand {
    /// Must own the review.
    pub user_id: UserId,
    /// Review being filled in.
    pub review_id: ReviewId,
    /// Answers for a single step; the variant names the step.
    pub payload: StepPayload,
}

/// Result of a step save.
#[derive(Debug, Clone)]
pub struct SaveStepResult {
    /// The review as stored after the save.
    pub review: Review,
    /// Step that was saved.
    pub step: ReviewStep,
    /// False when the same payload was already stored.
    pub changed: bool,
}

/// Error type for step saves.
#[derive(Debug, Error)]
pub enum SaveStepError {
    /// Missing, or owned by someone else.
    #[error("Review not found: {0}")]
    NotFound(ReviewId),
    /// The payload failed validation; nothing was written.
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

/// Handler for saving a wizard step.
///
/// Validates first, then writes only when the payload differs from what is
/// stored. The review advances only after the write succeeds.
pub struct SaveStepHandler {
    reviews: Arc<dyn ReviewRepository>,
    publisher: Arc<dyn EventPublisher>,
    policy: SavePolicy,
}

impl SaveStepHandler {
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

    pub async fn handle(&self, cmd: SaveStepCommand) -> Result<SaveStepResult, SaveStepError> {
        let step = cmd.payload.step();
        let validation = validate_step(&cmd.payload);
        if !validation.is_valid() {
            return Err(SaveStepError::Invalid {
                step,
                issues: validation.issues,
            });
        }

        let mut review = find_owned_review(self.reviews.as_ref(), &cmd.user_id, &cmd.review_id)
            .await?
            .ok_or(SaveStepError::NotFound(cmd.review_id))?;

        let changed = review.apply_saved_step(cmd.payload)?;
        if changed {
            let events = review.take_events();
            self.policy
                .run("save_step", || self.reviews.save_step_payload(&review, step))
                .await?;
            tracing::debug!(review_id = %review.id(), step = step.number(), "step saved");
            publish_review_events(self.publisher.as_ref(), events, &cmd.user_id).await;
        }

        Ok(SaveStepResult {
            review,
            step,
            changed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{review_through, user, Harness};
    use crate::domain::foundation::ErrorCode;
    use crate::domain::review::fixtures::valid_payload;
    use crate::domain::review::{ClearDecks, LookAhead};

    fn handler(h: &Harness) -> SaveStepHandler {
        SaveStepHandler::new(h.reviews.clone(), h.bus.clone(), h.policy)
    }

    async fn seeded(h: &Harness, steps: usize) -> ReviewId {
        let review = review_through("2024-12-18", steps);
        let id = review.id();
        h.reviews.insert(review).await;
        id
    }

    fn save(review_id: ReviewId, payload: StepPayload) -> SaveStepCommand {
        SaveStepCommand {
            user_id: user(),
            review_id,
            payload,
        }
    }

    #[tokio::test]
    async fn valid_payload_advances_furthest_step() {
        let h = Harness::new();
        let id = seeded(&h, 0).await;

        let result = handler(&h)
            .handle(save(id, valid_payload(ReviewStep::ClearDecks)))
            .await
            .unwrap();

        assert!(result.changed);
        assert_eq!(result.review.current_step(), ReviewStep::Commitments);
        let stored = h.reviews.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.current_step(), ReviewStep::Commitments);
        assert!(h.bus.has_event("review.step_saved.v1").await);
    }

    #[tokio::test]
    async fn invalid_payload_returns_field_issues_without_writing() {
        let h = Harness::new();
        let id = seeded(&h, 0).await;

        let err = handler(&h)
            .handle(save(id, StepPayload::ClearDecks(ClearDecks::default())))
            .await
            .unwrap_err();

        match err {
            SaveStepError::Invalid { step, issues } => {
                assert_eq!(step, ReviewStep::ClearDecks);
                assert_eq!(issues.len(), 2);
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
        assert_eq!(h.network.write_count(), 0);
    }

    #[tokio::test]
    async fn repeating_a_save_writes_once() {
        let h = Harness::new();
        let id = seeded(&h, 0).await;
        let payload = valid_payload(ReviewStep::ClearDecks);

        handler(&h).handle(save(id, payload.clone())).await.unwrap();
        let again = handler(&h).handle(save(id, payload)).await.unwrap();

        assert!(!again.changed);
        assert_eq!(h.network.write_count(), 1);
    }

    #[tokio::test]
    async fn failed_write_does_not_advance_stored_review() {
        let h = Harness::new();
        let id = seeded(&h, 2).await;
        h.network.fail_next_writes(1);

        let err = handler(&h)
            .handle(save(id, valid_payload(ReviewStep::LookAhead)))
            .await
            .unwrap_err();

        assert!(matches!(err, SaveStepError::Persistence(_)));
        let stored = h.reviews.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.current_step(), ReviewStep::LookAhead);
        assert_eq!(stored.draft().look_ahead, LookAhead::default());
    }

    #[tokio::test]
    async fn skipping_ahead_is_a_conflict() {
        let h = Harness::new();
        let id = seeded(&h, 0).await;

        let err = handler(&h)
            .handle(save(id, valid_payload(ReviewStep::ProtectTime)))
            .await
            .unwrap_err();

        assert!(matches!(err, SaveStepError::Domain(e) if e.code == ErrorCode::StepNotReached));
    }

    #[tokio::test]
    async fn another_users_review_is_not_found() {
        let h = Harness::new();
        let id = seeded(&h, 0).await;

        let err = handler(&h)
            .handle(SaveStepCommand {
                user_id: UserId::new("intruder").unwrap(),
                review_id: id,
                payload: valid_payload(ReviewStep::ClearDecks),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, SaveStepError::NotFound(_)));
    }
}
