//! Reminder kinds, channels, and coach-voice message templates.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderType {
    Scheduled,
    #[serde(rename = "followup_4h")]
    Followup4h,
    StreakRisk,
    FinalWarning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderChannel {
    Push,
    Email,
}

pub const STREAK_BROKEN_MESSAGE: &str = "Streak reset. Let's start fresh. Week 1 is ready.";

/// Message for a reminder. Only the streak-risk template uses `streak`.
pub fn coach_message(kind: ReminderType, streak: u32) -> String {
    match kind {
        ReminderType::Scheduled => {
            "Your weekly review is ready. 45 minutes to protect next week.".to_string()
        }
        ReminderType::Followup4h => {
            "Still time today. Don't let the week close without your review.".to_string()
        }
        ReminderType::StreakRisk => format!(
            "{}-week streak on the line. One review stands between you and starting over.",
            streak
        ),
        ReminderType::FinalWarning => "Last chance. Week closes in 2 hours.".to_string(),
    }
}

pub fn completion_message(week_number: u32) -> String {
    format!("Week {} complete.", week_number)
}
