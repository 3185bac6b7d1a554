//! Wizard state: where the user is and what they have typed.

use serde::Serialize;

use crate::domain::foundation::{ReviewId, ReviewStatus};
use crate::domain::review::{validate_step, FieldIssue, Review, ReviewDraft, ReviewStep};

/// Where the wizard currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "step")]
pub enum WizardPosition {
    Step(ReviewStep),
    Completed,
}

/// Last persistence failure, shown as a banner until the next attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveError {
    pub message: String,
    pub retryable: bool,
}

/// Complete state of one wizard session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardState {
    pub review_id: ReviewId,
    pub position: WizardPosition,
    /// Furthest step reached; never lowered by going back.
    pub furthest: ReviewStep,
    pub draft: ReviewDraft,
    /// Per step, whether validation messages are on screen.
    show_errors: [bool; 5],
    /// Step whose payload is being persisted, if any.
    pub saving: Option<ReviewStep>,
    pub save_error: Option<SaveError>,
}

impl WizardState {
    /// Fresh wizard on step 1 with an empty draft.
    pub fn new(review_id: ReviewId) -> Self {
        Self {
            review_id,
            position: WizardPosition::Step(ReviewStep::FIRST),
            furthest: ReviewStep::FIRST,
            draft: ReviewDraft::default(),
            show_errors: [false; 5],
            saving: None,
            save_error: None,
        }
    }

    /// Rebuilds the wizard from a persisted review, landing on its furthest step.
    pub fn resume(review: &Review) -> Self {
        let position = match review.status() {
            ReviewStatus::Completed => WizardPosition::Completed,
            _ => WizardPosition::Step(review.current_step()),
        };
        Self {
            position,
            furthest: review.current_step(),
            draft: review.draft().clone(),
            ..Self::new(review.id())
        }
    }

    /// The step on screen, or `None` once completed.
    pub fn current_step(&self) -> Option<ReviewStep> {
        match self.position {
            WizardPosition::Step(step) => Some(step),
            WizardPosition::Completed => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.position == WizardPosition::Completed
    }

    pub fn is_saving(&self) -> bool {
        self.saving.is_some()
    }

    pub fn shows_errors(&self, step: ReviewStep) -> bool {
        self.show_errors[usize::from(step.number() - 1)]
    }

    pub(super) fn set_show_errors(&mut self, step: ReviewStep, show: bool) {
        self.show_errors[usize::from(step.number() - 1)] = show;
    }

    /// Live validation of the step on screen. Always recomputed.
    pub fn issues(&self) -> Vec<FieldIssue> {
        self.current_step()
            .map(|step| validate_step(&self.draft.payload(step)).issues)
            .unwrap_or_default()
    }

    /// Issues the user should currently see: empty until an advance has
    /// been refused, and again after the next edit.
    pub fn visible_issues(&self) -> Vec<FieldIssue> {
        match self.current_step() {
            Some(step) if self.shows_errors(step) => self.issues(),
            _ => Vec::new(),
        }
    }

    /// Whether the forward button is enabled.
    pub fn can_advance(&self) -> bool {
        !self.is_saving() && !self.is_completed() && self.issues().is_empty()
    }
}
