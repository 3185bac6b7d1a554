//! Streak statistics derived from a set of completed weeks.

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::BTreeSet;

use crate::domain::calendar::week_start;

/// Derived counters for the dashboard.
///
/// Only fully elapsed weeks count: the current week is shown as `current`
/// on the heatmap whatever its completion state, so it never contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StreakStats {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_reviews: u32,
}

impl StreakStats {
    pub fn compute<I>(completed_weeks: I, today: NaiveDate) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let current = week_start(today);
        let weeks: BTreeSet<NaiveDate> = completed_weeks
            .into_iter()
            .map(week_start)
            .filter(|w| *w < current)
            .collect();

        let mut current_streak = 0;
        let mut cursor = current - Duration::weeks(1);
        while weeks.contains(&cursor) {
            current_streak += 1;
            cursor = cursor - Duration::weeks(1);
        }

        let mut longest_streak = 0;
        let mut run = 0;
        let mut previous: Option<NaiveDate> = None;
        for week in &weeks {
            run = match previous {
                Some(p) if *week - p == Duration::weeks(1) => run + 1,
                _ => 1,
            };
            longest_streak = longest_streak.max(run);
            previous = Some(*week);
        }

        Self {
            current_streak,
            longest_streak,
            total_reviews: weeks.len() as u32,
        }
    }
}

/// `total / (total + missed)` as a whole percent, rounded half up.
/// Zero when there is nothing to measure.
pub fn completion_rate(total: u32, missed: u32) -> u32 {
    let denominator = u64::from(total) + u64::from(missed);
    if denominator == 0 {
        return 0;
    }
    ((u64::from(total) * 200 + denominator) / (denominator * 2)) as u32
}
