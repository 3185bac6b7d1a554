//! Review aggregate: one weekly review per user per week.

use crate::domain::calendar::WeekInfo;
use crate::domain::foundation::{
    DomainError, ErrorCode, ReviewId, ReviewStatus, StateMachine, Timestamp, UserId,
};

use super::events::ReviewEvent;
use super::payload::{ReviewDraft, StepPayload};
use super::validation::validate_step;
use super::ReviewStep;

/// A user's review of one week.
///
/// `current_step` is the furthest step reached. It only moves forward while
/// the review is in progress; navigating back in the wizard never lowers it.
#[derive(Debug, Clone)]
pub struct Review {
    id: ReviewId,
    user_id: UserId,
    week: WeekInfo,
    status: ReviewStatus,
    current_step: ReviewStep,
    draft: ReviewDraft,
    started_at: Option<Timestamp>,
    completed_at: Option<Timestamp>,
    time_spent_seconds: u64,
    created_at: Timestamp,
    updated_at: Timestamp,
    domain_events: Vec<ReviewEvent>,
}

impl Review {
    /// Creates a not-yet-started review for the given week.
    pub fn new(user_id: UserId, week: WeekInfo) -> Self {
        let now = Timestamp::now();
        Self {
            id: ReviewId::new(),
            user_id,
            week,
            status: ReviewStatus::NotStarted,
            current_step: ReviewStep::FIRST,
            draft: ReviewDraft::default(),
            started_at: None,
            completed_at: None,
            time_spent_seconds: 0,
            created_at: now,
            updated_at: now,
            domain_events: Vec::new(),
        }
    }

    /// Reconstitutes a review from persisted data.
    ///
    /// Fails when the stored record breaks the completion invariant.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ReviewId,
        user_id: UserId,
        week: WeekInfo,
        status: ReviewStatus,
        current_step: ReviewStep,
        draft: ReviewDraft,
        started_at: Option<Timestamp>,
        completed_at: Option<Timestamp>,
        time_spent_seconds: u64,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Result<Self, DomainError> {
        if completed_at.is_some() != (status == ReviewStatus::Completed) {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                format!("Review {} has status {} but completed_at {:?}", id, status, completed_at),
            ));
        }
        Ok(Self {
            id,
            user_id,
            week,
            status,
            current_step,
            draft,
            started_at,
            completed_at,
            time_spent_seconds,
            created_at,
            updated_at,
            domain_events: Vec::new(),
        })
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn id(&self) -> ReviewId {
        self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn week(&self) -> WeekInfo {
        self.week
    }

    pub fn status(&self) -> ReviewStatus {
        self.status
    }

    pub fn current_step(&self) -> ReviewStep {
        self.current_step
    }

    pub fn draft(&self) -> &ReviewDraft {
        &self.draft
    }

    pub fn started_at(&self) -> Option<Timestamp> {
        self.started_at
    }

    pub fn completed_at(&self) -> Option<Timestamp> {
        self.completed_at
    }

    pub fn time_spent_seconds(&self) -> u64 {
        self.time_spent_seconds
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn is_completed(&self) -> bool {
        self.status == ReviewStatus::Completed
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    /// Number of steps saved so far, 0 through 5.
    pub fn progress(&self) -> u8 {
        match self.status {
            ReviewStatus::NotStarted => 0,
            ReviewStatus::InProgress => self.current_step.number() - 1,
            ReviewStatus::Completed => ReviewStep::LAST.number(),
        }
    }

    /// Takes accumulated domain events, clearing the internal buffer.
    pub fn take_events(&mut self) -> Vec<ReviewEvent> {
        std::mem::take(&mut self.domain_events)
    }

    // ───────────────────────────────────────────────────────────────
    // Lifecycle
    // ───────────────────────────────────────────────────────────────

    /// Opens the review for editing.
    pub fn begin(&mut self, now: Timestamp) -> Result<(), DomainError> {
        self.transition(ReviewStatus::InProgress)?;
        self.started_at = Some(now);
        self.updated_at = now;
        self.record_event(ReviewEvent::Started {
            review_id: self.id,
            started_at: now,
        });
        Ok(())
    }

    /// Stores a validated step payload and advances the furthest step.
    ///
    /// Returns `false` when the payload was already stored and nothing changed.
    pub fn apply_saved_step(&mut self, payload: StepPayload) -> Result<bool, DomainError> {
        self.ensure_editable()?;
        let step = payload.step();

        if step > self.current_step {
            return Err(DomainError::new(
                ErrorCode::StepNotReached,
                format!(
                    "Cannot save {} before completing {}",
                    step, self.current_step
                ),
            )
            .with_detail("step", step.number().to_string()));
        }

        let validation = validate_step(&payload);
        if !validation.is_valid() {
            return Err(DomainError::new(
                ErrorCode::StepIncomplete,
                format!("{} has {} incomplete field(s)", step, validation.issues.len()),
            )
            .with_detail("step", step.number().to_string()));
        }

        let reached = step.next().unwrap_or(ReviewStep::LAST).max(self.current_step);
        if self.draft.payload(step) == payload && reached == self.current_step {
            return Ok(false);
        }

        self.draft.set(payload);
        self.current_step = reached;
        self.updated_at = Timestamp::now();
        self.record_event(ReviewEvent::StepSaved {
            review_id: self.id,
            step,
        });
        Ok(true)
    }

    /// Marks the review completed. Requires step 5 reached and all five
    /// step payloads valid.
    pub fn complete(
        &mut self,
        completed_at: Timestamp,
        time_spent_seconds: u64,
    ) -> Result<(), DomainError> {
        self.ensure_editable()?;

        if self.current_step != ReviewStep::LAST {
            return Err(DomainError::new(
                ErrorCode::StepNotReached,
                format!("Cannot complete review while on {}", self.current_step),
            ));
        }

        if let Some(step) = ReviewStep::ALL
            .into_iter()
            .find(|step| !validate_step(&self.draft.payload(*step)).is_valid())
        {
            return Err(DomainError::new(
                ErrorCode::StepIncomplete,
                format!("{} is incomplete", step),
            )
            .with_detail("step", step.number().to_string()));
        }

        self.transition(ReviewStatus::Completed)?;
        self.completed_at = Some(completed_at);
        self.time_spent_seconds = time_spent_seconds;
        self.updated_at = completed_at;
        self.record_event(ReviewEvent::Completed {
            review_id: self.id,
            week_start: self.week.week_start,
            completed_at,
            time_spent_seconds,
        });
        Ok(())
    }

    // ───────────────────────────────────────────────────────────────
    // Internal Helpers
    // ───────────────────────────────────────────────────────────────

    fn ensure_editable(&self) -> Result<(), DomainError> {
        match self.status {
            ReviewStatus::InProgress => Ok(()),
            ReviewStatus::Completed => Err(DomainError::new(
                ErrorCode::ReviewCompleted,
                "Review is already completed",
            )),
            ReviewStatus::NotStarted => Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Review has not been started",
            )),
        }
    }

    fn transition(&mut self, target: ReviewStatus) -> Result<(), DomainError> {
        self.status = self
            .status
            .transition_to(target)
            .map_err(|e| DomainError::new(ErrorCode::InvalidStateTransition, e.to_string()))?;
        Ok(())
    }

    fn record_event(&mut self, event: ReviewEvent) {
        self.domain_events.push(event);
    }
}
