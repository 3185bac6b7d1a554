//! Review schedule settings and reminder planning.

mod messages;
mod planner;
mod settings;

pub use messages::{
    coach_message, completion_message, ReminderChannel, ReminderType, STREAK_BROKEN_MESSAGE,
};
pub use planner::{plan_reminder, DueReminder};
pub use settings::ReviewSettings;
