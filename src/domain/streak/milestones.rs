//! Streak milestones and the completion summary.

use serde::Serialize;

use super::Streak;
use crate::domain::reminder::completion_message;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Milestone {
    pub weeks: u32,
    pub message: &'static str,
}

pub const MILESTONES: [Milestone; 5] = [
    Milestone {
        weeks: 4,
        message: "One month of consistent reviews. The habit is forming.",
    },
    Milestone {
        weeks: 8,
        message: "Two months strong. You're building real momentum.",
    },
    Milestone {
        weeks: 12,
        message: "That's a quarter of reviews. Keep building.",
    },
    Milestone {
        weeks: 26,
        message: "Half a year. This is who you are now.",
    },
    Milestone {
        weeks: 52,
        message: "One year of weekly reviews. Exceptional.",
    },
];

/// The milestone reached by exactly this streak length.
pub fn milestone_for(streak: u32) -> Option<Milestone> {
    MILESTONES.iter().copied().find(|m| m.weeks == streak)
}

/// The next milestone still ahead of this streak length.
pub fn next_milestone(streak: u32) -> Option<Milestone> {
    MILESTONES.iter().copied().find(|m| m.weeks > streak)
}

/// What the completion screen shows after a review is finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionOutcome {
    pub week_number: u32,
    pub message: String,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_reviews: u32,
    pub milestone: Option<Milestone>,
    pub is_new_record: bool,
}

impl CompletionOutcome {
    /// `previous_longest` is the record before this completion was counted.
    pub fn new(week_number: u32, previous_longest: u32, streak: &Streak) -> Self {
        Self {
            week_number,
            message: completion_message(week_number),
            current_streak: streak.current_streak,
            longest_streak: streak.longest_streak,
            total_reviews: streak.total_reviews,
            milestone: milestone_for(streak.current_streak),
            is_new_record: streak.current_streak > previous_longest,
        }
    }
}
