//! Review domain events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ReviewStep;
use crate::domain::foundation::{ReviewId, Timestamp};

/// Events recorded by the `Review` aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReviewEvent {
    Started {
        review_id: ReviewId,
        started_at: Timestamp,
    },

    /// A step payload was accepted and persisted.
    StepSaved {
        review_id: ReviewId,
        step: ReviewStep,
    },

    Completed {
        review_id: ReviewId,
        week_start: NaiveDate,
        completed_at: Timestamp,
        time_spent_seconds: u64,
    },
}
