//! HTTP DTOs for review endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::calendar::{format_time_elapsed, format_week_display, WeekInfo};
use crate::domain::foundation::{ReviewStatus, Timestamp};
use crate::domain::review::{FieldIssue, Review, ReviewDraft, ReviewStep, StepInfo, StepValidation};
use crate::domain::streak::CompletionOutcome;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Body of a step save. The payload shape is decided by the step in the path.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveStepRequest {
    pub payload: serde_json::Value,
    /// Wizard session time; read only when the last step completes the review.
    #[serde(default)]
    pub time_spent_seconds: u64,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    pub id: String,
    pub week: WeekInfo,
    pub week_display: String,
    pub status: ReviewStatus,
    pub current_step: u8,
    /// Steps done, 0 to 5.
    pub progress: u8,
    pub steps: Vec<StepInfo>,
    pub draft: ReviewDraft,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,
    pub time_spent_seconds: u64,
    pub time_spent_display: String,
    pub updated_at: Timestamp,
}

impl From<&Review> for ReviewResponse {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id().to_string(),
            week: review.week(),
            week_display: format_week_display(review.week().week_start),
            status: review.status(),
            current_step: review.current_step().number(),
            progress: review.progress(),
            steps: ReviewStep::ALL.iter().map(|s| s.info()).collect(),
            draft: review.draft().clone(),
            started_at: review.started_at(),
            completed_at: review.completed_at(),
            time_spent_seconds: review.time_spent_seconds(),
            time_spent_display: format_time_elapsed(review.time_spent_seconds()),
            updated_at: review.updated_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StartReviewResponse {
    pub review: ReviewResponse,
    pub resumed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationResponse {
    pub step: u8,
    pub valid: bool,
    pub issues: Vec<FieldIssue>,
}

impl From<StepValidation> for ValidationResponse {
    fn from(validation: StepValidation) -> Self {
        Self {
            step: validation.step.number(),
            valid: validation.is_valid(),
            issues: validation.issues,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SaveStepResponse {
    pub review: ReviewResponse,
    pub saved_step: u8,
    /// Step the wizard moves to.
    pub next_step: Option<u8>,
    pub changed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompleteReviewResponse {
    pub review: ReviewResponse,
    pub outcome: CompletionOutcome,
}
