//! The five ordered steps of a weekly review.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// One step of the review wizard. Discriminants are the step numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ReviewStep {
    ClearDecks = 1,
    Commitments = 2,
    LookAhead = 3,
    ProtectTime = 4,
    Reflect = 5,
}

/// Display metadata for a step.
#[derive(Debug, Clone, Serialize)]
pub struct StepInfo {
    pub step: u8,
    pub key: &'static str,
    pub label: &'static str,
    pub full_label: &'static str,
    pub time_estimate: &'static str,
}

impl ReviewStep {
    pub const ALL: [ReviewStep; 5] = [
        ReviewStep::ClearDecks,
        ReviewStep::Commitments,
        ReviewStep::LookAhead,
        ReviewStep::ProtectTime,
        ReviewStep::Reflect,
    ];

    pub const FIRST: ReviewStep = ReviewStep::ClearDecks;
    pub const LAST: ReviewStep = ReviewStep::Reflect;

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(n: u8) -> Result<Self, ValidationError> {
        match n {
            1 => Ok(ReviewStep::ClearDecks),
            2 => Ok(ReviewStep::Commitments),
            3 => Ok(ReviewStep::LookAhead),
            4 => Ok(ReviewStep::ProtectTime),
            5 => Ok(ReviewStep::Reflect),
            other => Err(ValidationError::out_of_range("step", 1, 5, i32::from(other))),
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1).ok()
    }

    pub fn previous(self) -> Option<Self> {
        self.number()
            .checked_sub(1)
            .and_then(|n| Self::from_number(n).ok())
    }

    pub fn is_last(self) -> bool {
        self == Self::LAST
    }

    pub fn key(self) -> &'static str {
        match self {
            ReviewStep::ClearDecks => "clear",
            ReviewStep::Commitments => "commit",
            ReviewStep::LookAhead => "ahead",
            ReviewStep::ProtectTime => "protect",
            ReviewStep::Reflect => "reflect",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReviewStep::ClearDecks => "Clear",
            ReviewStep::Commitments => "Commit",
            ReviewStep::LookAhead => "Ahead",
            ReviewStep::ProtectTime => "Protect",
            ReviewStep::Reflect => "Reflect",
        }
    }

    pub fn full_label(self) -> &'static str {
        match self {
            ReviewStep::ClearDecks => "Clear the Decks",
            ReviewStep::Commitments => "Review Commitments",
            ReviewStep::LookAhead => "Look Ahead",
            ReviewStep::ProtectTime => "Protect Your Time",
            ReviewStep::Reflect => "Quick Reflection",
        }
    }

    pub fn time_estimate(self) -> &'static str {
        match self {
            ReviewStep::ClearDecks => "15-20 min",
            ReviewStep::Commitments => "20-25 min",
            ReviewStep::LookAhead => "10-15 min",
            ReviewStep::ProtectTime => "5-10 min",
            ReviewStep::Reflect => "5 min",
        }
    }

    pub fn info(self) -> StepInfo {
        StepInfo {
            step: self.number(),
            key: self.key(),
            label: self.label(),
            full_label: self.full_label(),
            time_estimate: self.time_estimate(),
        }
    }
}

impl TryFrom<u8> for ReviewStep {
    type Error = ValidationError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Self::from_number(n)
    }
}

impl From<ReviewStep> for u8 {
    fn from(step: ReviewStep) -> Self {
        step.number()
    }
}

impl fmt::Display for ReviewStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {} ({})", self.number(), self.full_label())
    }
}
