//! Decides which reminder, if any, is due for a week not yet reviewed.
//!
//! Delivery happens elsewhere; this only picks the tier and channels.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::{coach_message, ReminderChannel, ReminderType, ReviewSettings};
use crate::domain::calendar::hours_remaining_in_week;

const FINAL_WARNING_HOURS: i64 = 2;
const STREAK_RISK_HOURS: i64 = 24;
const FOLLOWUP_AFTER_HOURS: i64 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DueReminder {
    pub kind: ReminderType,
    pub channels: Vec<ReminderChannel>,
    pub message: String,
}

/// Picks the most urgent reminder due at `now`.
///
/// Returns `None` once the week is reviewed, before the scheduled time, or
/// when every channel is switched off.
pub fn plan_reminder(
    settings: &ReviewSettings,
    now: DateTime<Utc>,
    reviewed_this_week: bool,
    current_streak: u32,
) -> Option<DueReminder> {
    if reviewed_this_week {
        return None;
    }

    let channels: Vec<ReminderChannel> = [
        (settings.push_enabled, ReminderChannel::Push),
        (settings.email_reminders, ReminderChannel::Email),
    ]
    .into_iter()
    .filter_map(|(enabled, channel)| enabled.then_some(channel))
    .collect();
    if channels.is_empty() {
        return None;
    }

    let hours_left = hours_remaining_in_week(now);
    let scheduled = settings.scheduled_at(now.date_naive());
    let escalate = settings.escalation_enabled;

    let kind = if hours_left <= FINAL_WARNING_HOURS {
        ReminderType::FinalWarning
    } else if escalate && current_streak > 0 && hours_left < STREAK_RISK_HOURS {
        ReminderType::StreakRisk
    } else if now >= scheduled {
        if escalate && now >= scheduled + Duration::hours(FOLLOWUP_AFTER_HOURS) {
            ReminderType::Followup4h
        } else {
            ReminderType::Scheduled
        }
    } else {
        return None;
    };

    Some(DueReminder {
        kind,
        channels,
        message: coach_message(kind, current_streak),
    })
}
