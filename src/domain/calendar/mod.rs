//! Date/week utility: Sunday-anchored week boundaries and display helpers.

mod week;

pub use week::{
    days_remaining_in_week, format_time_elapsed, format_week_display, hours_remaining_in_week,
    is_current_week, is_streak_at_risk, past_weeks, week_end, week_info, week_start, weeks_between,
    WeekInfo,
};
