//! WizardController - drives one wizard session against the handlers.
//!
//! The pure reducer decides every transition; the controller only performs
//! the save the reducer asked for and feeds the result back in.

use std::sync::Arc;

use crate::application::handlers::{
    CompleteReviewCommand, CompleteReviewError, CompleteReviewHandler, SaveStepCommand,
    SaveStepError, SaveStepHandler, StartReviewCommand, StartReviewError, StartReviewHandler,
};
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::review::{FieldIssue, ReviewStep, StepPayload};
use crate::domain::streak::CompletionOutcome;
use crate::domain::wizard::{reduce, FieldEdit, SessionTimer, WizardEvent, WizardState};

const SAVE_FAILED_MESSAGE: &str = "Couldn't save your progress. Your answers are still here, try again.";

/// Result of pressing the forward button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Nothing happened: already completed or a save is in flight.
    Ignored,
    /// The step has unfinished fields; they are now on screen.
    Invalid(Vec<FieldIssue>),
    /// Saved; the wizard moved to this step.
    Advanced(ReviewStep),
    Completed(CompletionOutcome),
    /// The wizard stayed on the step with the draft intact.
    SaveFailed { message: String, retryable: bool },
}

pub struct WizardController {
    user_id: UserId,
    state: WizardState,
    timer: SessionTimer,
    save_step: Arc<SaveStepHandler>,
    complete_review: Arc<CompleteReviewHandler>,
}

impl WizardController {
    /// Starts or resumes this week's review and opens the wizard on its
    /// furthest step.
    pub async fn open(
        start_review: &StartReviewHandler,
        save_step: Arc<SaveStepHandler>,
        complete_review: Arc<CompleteReviewHandler>,
        user_id: UserId,
        now: Timestamp,
    ) -> Result<Self, StartReviewError> {
        let started = start_review
            .handle(StartReviewCommand {
                user_id: user_id.clone(),
                now,
            })
            .await?;

        Ok(Self {
            user_id,
            state: WizardState::resume(&started.review),
            timer: SessionTimer::resume(started.review.time_spent_seconds()),
            save_step,
            complete_review,
        })
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.timer.elapsed_seconds()
    }

    /// Live validation of the step on screen.
    pub fn issues(&self) -> Vec<FieldIssue> {
        self.state.issues()
    }

    /// Applies an edit to the step on screen. Edits to other steps are
    /// dropped.
    pub fn edit(&mut self, edit: FieldEdit) {
        self.dispatch(WizardEvent::FieldChanged(edit));
    }

    pub fn back(&mut self) {
        self.dispatch(WizardEvent::BackRequested);
    }

    pub async fn advance(&mut self, now: Timestamp) -> AdvanceOutcome {
        let Some(step) = self.state.current_step() else {
            return AdvanceOutcome::Ignored;
        };
        if self.state.is_saving() {
            return AdvanceOutcome::Ignored;
        }

        self.dispatch(WizardEvent::AdvanceRequested);
        if !self.state.is_saving() {
            return AdvanceOutcome::Invalid(self.state.visible_issues());
        }

        let payload = self.state.draft.payload(step);
        let saved = if step.is_last() {
            self.complete(payload, now).await.map(Some)
        } else {
            self.save(payload).await.map(|_| None)
        };

        match saved {
            Ok(outcome) => {
                self.dispatch(WizardEvent::SaveSucceeded);
                match (outcome, self.state.current_step()) {
                    (Some(outcome), _) => AdvanceOutcome::Completed(outcome),
                    (None, Some(next)) => AdvanceOutcome::Advanced(next),
                    (None, None) => AdvanceOutcome::Ignored,
                }
            }
            Err((message, retryable)) => {
                self.dispatch(WizardEvent::SaveFailed {
                    message: message.clone(),
                    retryable,
                });
                AdvanceOutcome::SaveFailed { message, retryable }
            }
        }
    }

    fn dispatch(&mut self, event: WizardEvent) {
        self.state = reduce(self.state.clone(), &event);
    }

    async fn save(&self, payload: StepPayload) -> Result<(), (String, bool)> {
        self.save_step
            .handle(SaveStepCommand {
                user_id: self.user_id.clone(),
                review_id: self.state.review_id,
                payload,
            })
            .await
            .map(|_| ())
            .map_err(|error| match error {
                SaveStepError::Persistence(failure) => {
                    (SAVE_FAILED_MESSAGE.to_string(), failure.is_retryable())
                }
                other => (other.to_string(), false),
            })
    }

    async fn complete(
        &self,
        payload: StepPayload,
        now: Timestamp,
    ) -> Result<CompletionOutcome, (String, bool)> {
        let StepPayload::Reflect(reflection) = payload else {
            return Err(("Only the reflection step completes a review".to_string(), false));
        };

        self.complete_review
            .handle(CompleteReviewCommand {
                user_id: self.user_id.clone(),
                review_id: self.state.review_id,
                reflection,
                time_spent_seconds: self.elapsed_seconds(),
                now,
            })
            .await
            .map(|result| result.outcome)
            .map_err(|error| match error {
                CompleteReviewError::Persistence(failure) => {
                    (SAVE_FAILED_MESSAGE.to_string(), failure.is_retryable())
                }
                other => (other.to_string(), false),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{at, user, Harness};
    use crate::domain::review::InboxSource;
    use crate::domain::wizard::WizardPosition;
    use crate::ports::ReviewRepository;

    async fn open(h: &Harness) -> WizardController {
        let start = StartReviewHandler::new(h.reviews.clone(), h.bus.clone(), h.policy);
        let save = Arc::new(SaveStepHandler::new(h.reviews.clone(), h.bus.clone(), h.policy));
        let complete = Arc::new(CompleteReviewHandler::new(
            h.reviews.clone(),
            h.streaks.clone(),
            h.bus.clone(),
            h.policy,
        ));
        WizardController::open(&start, save, complete, user(), at("2024-12-18"))
            .await
            .unwrap()
    }

    fn fill_clear_decks(wizard: &mut WizardController) {
        for source in InboxSource::ALL {
            wizard.edit(FieldEdit::Inbox(source, true));
        }
        wizard.edit(FieldEdit::CaptureNotes("Call the plumber".into()));
    }

    #[tokio::test]
    async fn opens_on_step_one_of_a_new_review() {
        let h = Harness::new();

        let wizard = open(&h).await;

        assert_eq!(wizard.state().position, WizardPosition::Step(ReviewStep::ClearDecks));
        assert_eq!(wizard.issues().len(), 2);
    }

    #[tokio::test]
    async fn incomplete_step_is_refused_with_visible_issues() {
        let h = Harness::new();
        let mut wizard = open(&h).await;
        wizard.edit(FieldEdit::CaptureNotes("only notes".into()));

        let outcome = wizard.advance(at("2024-12-18")).await;

        match outcome {
            AdvanceOutcome::Invalid(issues) => {
                assert_eq!(issues.len(), 1);
                assert_eq!(issues[0].message, "Process all inbox sources (0/6 processed)");
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
        assert_eq!(h.network.write_count(), 1); // only the create
    }

    #[tokio::test]
    async fn valid_step_is_saved_then_advanced() {
        let h = Harness::new();
        let mut wizard = open(&h).await;
        fill_clear_decks(&mut wizard);

        let outcome = wizard.advance(at("2024-12-18")).await;

        assert_eq!(outcome, AdvanceOutcome::Advanced(ReviewStep::Commitments));
        let stored = h
            .reviews
            .find_by_id(&wizard.state().review_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.current_step(), ReviewStep::Commitments);
        assert_eq!(stored.draft().clear_decks.capture_notes, "Call the plumber");
    }

    #[tokio::test]
    async fn failed_save_keeps_step_and_draft() {
        let h = Harness::new();
        let mut wizard = open(&h).await;
        fill_clear_decks(&mut wizard);
        h.network.fail_next_writes(1);

        let outcome = wizard.advance(at("2024-12-18")).await;

        assert!(matches!(outcome, AdvanceOutcome::SaveFailed { retryable: true, .. }));
        assert_eq!(wizard.state().current_step(), Some(ReviewStep::ClearDecks));
        assert!(wizard.state().save_error.is_some());
        assert_eq!(wizard.state().draft.clear_decks.capture_notes, "Call the plumber");

        let retry = wizard.advance(at("2024-12-18")).await;
        assert_eq!(retry, AdvanceOutcome::Advanced(ReviewStep::Commitments));
        assert!(wizard.state().save_error.is_none());
    }

    #[tokio::test]
    async fn reopening_resumes_at_furthest_step() {
        let h = Harness::new();
        let mut wizard = open(&h).await;
        fill_clear_decks(&mut wizard);
        wizard.advance(at("2024-12-18")).await;

        let reopened = open(&h).await;

        assert_eq!(reopened.state().review_id, wizard.state().review_id);
        assert_eq!(reopened.state().current_step(), Some(ReviewStep::Commitments));
    }

    #[tokio::test]
    async fn back_then_edit_only_touches_the_step_on_screen() {
        let h = Harness::new();
        let mut wizard = open(&h).await;
        fill_clear_decks(&mut wizard);
        wizard.advance(at("2024-12-18")).await;

        wizard.back();
        wizard.edit(FieldEdit::WhatWorked("ignored".into()));
        wizard.edit(FieldEdit::CaptureNotes("Renew passport".into()));

        assert_eq!(wizard.state().current_step(), Some(ReviewStep::ClearDecks));
        assert_eq!(wizard.state().furthest, ReviewStep::Commitments);
        assert_eq!(wizard.state().draft.reflection.what_worked, "");
        assert_eq!(wizard.state().draft.clear_decks.capture_notes, "Renew passport");
    }
}
