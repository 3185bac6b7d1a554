//! Durable per-user streak record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::completion_rate;
use crate::domain::calendar::{week_start, weeks_between};
use crate::domain::foundation::{Timestamp, UserId};

/// One per user. Created on the first completed review and updated on every
/// completion or detected missed week.
///
/// `longest_streak` is a running maximum, so it survives history beyond any
/// display window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub user_id: UserId,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_reviews: u32,
    /// Weeks skipped between completions.
    pub missed_weeks: u32,
    pub last_completed_week: Option<NaiveDate>,
    pub streak_started_at: Option<NaiveDate>,
    pub updated_at: Timestamp,
}

impl Streak {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            current_streak: 0,
            longest_streak: 0,
            total_reviews: 0,
            missed_weeks: 0,
            last_completed_week: None,
            streak_started_at: None,
            updated_at: Timestamp::now(),
        }
    }

    /// Counts a completed review for the week containing `week`.
    ///
    /// Returns false, changing nothing, when that week or a later one was
    /// already counted. Out-of-order history goes through `rebuild`.
    pub fn record_completion(&mut self, week: NaiveDate) -> bool {
        let week = week_start(week);
        match self.last_completed_week {
            Some(last) if week <= last => return false,
            Some(last) => {
                let gap = weeks_between(last, week) as u32;
                if gap == 1 && self.current_streak > 0 {
                    self.current_streak += 1;
                } else {
                    self.missed_weeks += gap.saturating_sub(1);
                    self.start_new_streak(week);
                }
            }
            None => self.start_new_streak(week),
        }

        self.total_reviews += 1;
        self.longest_streak = self.longest_streak.max(self.current_streak);
        self.last_completed_week = Some(week);
        self.updated_at = Timestamp::now();
        true
    }

    /// Resets the current streak once a full week has passed without a
    /// review. Returns true if the record changed.
    pub fn reconcile(&mut self, today: NaiveDate) -> bool {
        if self.current_streak > 0 && self.effective_current_streak(today) == 0 {
            self.current_streak = 0;
            self.streak_started_at = None;
            self.updated_at = Timestamp::now();
            return true;
        }
        false
    }

    /// The streak as of `today`: still alive while either this week or last
    /// week was completed, zero otherwise.
    pub fn effective_current_streak(&self, today: NaiveDate) -> u32 {
        match self.last_completed_week {
            Some(last) if weeks_between(last, today) <= 1 => self.current_streak,
            _ => 0,
        }
    }

    /// Weeks missed so far, counting elapsed weeks since the last
    /// completion that `record_completion` has not seen yet.
    pub fn missed_weeks_as_of(&self, today: NaiveDate) -> u32 {
        let pending = self
            .last_completed_week
            .map(|last| (weeks_between(last, today) - 1).max(0) as u32)
            .unwrap_or(0);
        self.missed_weeks + pending
    }

    pub fn completion_rate(&self, today: NaiveDate) -> u32 {
        completion_rate(self.total_reviews, self.missed_weeks_as_of(today))
    }

    /// True once the week has been counted.
    pub fn has_completed(&self, week: NaiveDate) -> bool {
        self.last_completed_week == Some(week_start(week))
    }

    /// Reconstructs the record from every completed week. Weeks after the
    /// one containing `today` are ignored.
    pub fn rebuild<I>(user_id: UserId, completed_weeks: I, today: NaiveDate) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let current = week_start(today);
        let weeks: BTreeSet<NaiveDate> = completed_weeks
            .into_iter()
            .map(week_start)
            .filter(|w| *w <= current)
            .collect();

        let mut streak = Self::new(user_id);
        for week in weeks {
            streak.record_completion(week);
        }
        streak.reconcile(today);
        streak
    }

    fn start_new_streak(&mut self, week: NaiveDate) {
        self.current_streak = 1;
        self.streak_started_at = Some(week);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    fn sunday(weeks_from_base: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 22).unwrap() + Duration::weeks(weeks_from_base)
    }

    #[test]
    fn first_completion_starts_streak() {
        let mut streak = Streak::new(user());
        assert!(streak.record_completion(sunday(0) + Duration::days(3)));

        assert_eq!(streak.current_streak, 1);
        assert_eq!(streak.longest_streak, 1);
        assert_eq!(streak.total_reviews, 1);
        assert_eq!(streak.last_completed_week, Some(sunday(0)));
        assert_eq!(streak.streak_started_at, Some(sunday(0)));
    }

    #[test]
    fn same_week_twice_counts_once() {
        let mut streak = Streak::new(user());
        streak.record_completion(sunday(0));
        assert!(!streak.record_completion(sunday(0) + Duration::days(6)));
        assert_eq!(streak.total_reviews, 1);
    }

    #[test]
    fn consecutive_weeks_extend_streak() {
        let mut streak = Streak::new(user());
        for w in 0..4 {
            streak.record_completion(sunday(w));
        }
        assert_eq!(streak.current_streak, 4);
        assert_eq!(streak.longest_streak, 4);
        assert_eq!(streak.streak_started_at, Some(sunday(0)));
    }

    #[test]
    fn gap_resets_current_and_counts_missed() {
        let mut streak = Streak::new(user());
        for w in [0, 1, 2, 5] {
            streak.record_completion(sunday(w));
        }
        assert_eq!(streak.current_streak, 1);
        assert_eq!(streak.longest_streak, 3);
        assert_eq!(streak.missed_weeks, 2);
        assert_eq!(streak.total_reviews, 4);
        assert_eq!(streak.streak_started_at, Some(sunday(5)));
    }

    #[test]
    fn longest_is_a_running_maximum() {
        let mut streak = Streak::new(user());
        for w in (0..30).chain(40..42) {
            streak.record_completion(sunday(w));
        }
        assert_eq!(streak.longest_streak, 30);
        assert_eq!(streak.current_streak, 2);
    }

    #[test]
    fn effective_streak_survives_one_open_week() {
        let mut streak = Streak::new(user());
        streak.record_completion(sunday(0));
        streak.record_completion(sunday(1));

        assert_eq!(streak.effective_current_streak(sunday(1)), 2);
        assert_eq!(streak.effective_current_streak(sunday(2) + Duration::days(5)), 2);
        assert_eq!(streak.effective_current_streak(sunday(3)), 0);
    }

    #[test]
    fn reconcile_resets_after_missed_week() {
        let mut streak = Streak::new(user());
        streak.record_completion(sunday(0));

        assert!(!streak.reconcile(sunday(1)));
        assert!(streak.reconcile(sunday(2)));
        assert_eq!(streak.current_streak, 0);
        assert!(!streak.reconcile(sunday(3)));

        streak.record_completion(sunday(3));
        assert_eq!(streak.current_streak, 1);
        assert_eq!(streak.missed_weeks, 2);
    }

    #[test]
    fn completion_rate_includes_pending_missed_weeks() {
        let mut streak = Streak::new(user());
        streak.record_completion(sunday(0));
        streak.record_completion(sunday(2));

        assert_eq!(streak.missed_weeks_as_of(sunday(3)), 1);
        assert_eq!(streak.completion_rate(sunday(3)), 67);
        assert_eq!(streak.missed_weeks_as_of(sunday(5)), 3);
        assert_eq!(streak.completion_rate(sunday(5)), 40);
    }

    #[test]
    fn empty_record_has_zero_rate() {
        assert_eq!(Streak::new(user()).completion_rate(sunday(0)), 0);
    }

    #[test]
    fn rebuild_matches_incremental_updates() {
        let weeks = [sunday(5), sunday(0), sunday(1), sunday(2), sunday(5), sunday(9)];
        let rebuilt = Streak::rebuild(user(), weeks, sunday(6));

        assert_eq!(rebuilt.total_reviews, 4);
        assert_eq!(rebuilt.longest_streak, 3);
        assert_eq!(rebuilt.current_streak, 1);
        assert_eq!(rebuilt.last_completed_week, Some(sunday(5)));
    }

    #[test]
    fn rebuild_resets_stale_streak() {
        let rebuilt = Streak::rebuild(user(), [sunday(0), sunday(1)], sunday(4));
        assert_eq!(rebuilt.current_streak, 0);
        assert_eq!(rebuilt.longest_streak, 2);
    }
}
