//! Lifecycle status of a weekly review.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{StateMachine, ValidationError};

/// Status of a review: `not_started → in_progress → completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::NotStarted => "not_started",
            ReviewStatus::InProgress => "in_progress",
            ReviewStatus::Completed => "completed",
        }
    }

    /// True while step payloads may still be saved.
    pub fn is_editable(&self) -> bool {
        !matches!(self, ReviewStatus::Completed)
    }
}

impl StateMachine for ReviewStatus {
    fn successors(&self) -> &'static [Self] {
        match self {
            ReviewStatus::NotStarted => &[ReviewStatus::InProgress],
            ReviewStatus::InProgress => &[ReviewStatus::Completed],
            ReviewStatus::Completed => &[],
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_started" => Ok(ReviewStatus::NotStarted),
            "in_progress" => Ok(ReviewStatus::InProgress),
            "completed" => Ok(ReviewStatus::Completed),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown review status '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_is_linear() {
        let status = ReviewStatus::NotStarted;
        let status = status.transition_to(ReviewStatus::InProgress).unwrap();
        let status = status.transition_to(ReviewStatus::Completed).unwrap();
        assert!(status.is_terminal());
    }

    #[test]
    fn cannot_skip_in_progress() {
        assert!(ReviewStatus::NotStarted
            .transition_to(ReviewStatus::Completed)
            .is_err());
    }

    #[test]
    fn completed_cannot_reopen() {
        assert!(!ReviewStatus::Completed.can_transition_to(ReviewStatus::InProgress));
        assert!(!ReviewStatus::Completed.is_editable());
    }

    #[test]
    fn parses_and_displays_snake_case() {
        for status in [
            ReviewStatus::NotStarted,
            ReviewStatus::InProgress,
            ReviewStatus::Completed,
        ] {
            assert_eq!(status.to_string().parse::<ReviewStatus>().unwrap(), status);
        }
        assert!("archived".parse::<ReviewStatus>().is_err());
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&ReviewStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }
}
