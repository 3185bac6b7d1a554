//! History browsing: one entry per week since the user's first review.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Review;
use crate::domain::calendar::{week_info, week_start, WeekInfo};
use crate::domain::foundation::{ReviewId, ReviewStatus, Timestamp};

/// Outcome of one week as shown in history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryStatus {
    Complete,
    Missed,
    /// Only ever the current week.
    InProgress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryFilter {
    #[default]
    All,
    Complete,
    Missed,
}

impl HistoryFilter {
    fn admits(self, status: HistoryStatus) -> bool {
        match self {
            HistoryFilter::All => true,
            HistoryFilter::Complete => status == HistoryStatus::Complete,
            HistoryFilter::Missed => status == HistoryStatus::Missed,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub status: HistoryFilter,
    /// Case-insensitive text matched against Big Three and one-change.
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub week: WeekInfo,
    pub review_id: Option<ReviewId>,
    pub status: HistoryStatus,
    pub completed_at: Option<Timestamp>,
    pub duration_minutes: Option<u64>,
    pub big_three: Vec<String>,
    pub one_change: Option<String>,
}

impl HistoryEntry {
    fn from_review(review: &Review, status: HistoryStatus) -> Self {
        let draft = review.draft();
        let big_three = draft
            .look_ahead
            .big_three
            .iter()
            .filter(|p| !p.trim().is_empty())
            .cloned()
            .collect();
        let one_change = Some(draft.reflection.one_change.clone()).filter(|c| !c.trim().is_empty());
        let completed = review.is_completed();

        Self {
            week: review.week(),
            review_id: Some(review.id()),
            status,
            completed_at: review.completed_at(),
            duration_minutes: completed.then(|| (review.time_spent_seconds() + 30) / 60),
            big_three,
            one_change,
        }
    }

    fn missed(week: WeekInfo) -> Self {
        Self {
            week,
            review_id: None,
            status: HistoryStatus::Missed,
            completed_at: None,
            duration_minutes: None,
            big_three: Vec::new(),
            one_change: None,
        }
    }

    fn matches_text(&self, needle: &str) -> bool {
        let mut haystack = self.big_three.join(" ");
        if let Some(change) = &self.one_change {
            haystack.push(' ');
            haystack.push_str(change);
        }
        haystack.to_lowercase().contains(needle)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryPage {
    pub entries: Vec<HistoryEntry>,
    /// Counts over the unfiltered history.
    pub complete_count: usize,
    pub missed_count: usize,
}

/// Builds the history newest first.
///
/// Every week from the user's first review up to the previous week gets an
/// entry; weeks without a completed review are missed. The current week is
/// included only when a review for it exists.
pub fn build_history(reviews: &[Review], today: NaiveDate, query: &HistoryQuery) -> HistoryPage {
    let current = week_start(today);
    let by_week: HashMap<NaiveDate, &Review> = reviews
        .iter()
        .map(|r| (r.week().week_start, r))
        .collect();

    let mut all = Vec::new();
    if let Some(review) = by_week.get(&current) {
        let status = match review.status() {
            ReviewStatus::Completed => HistoryStatus::Complete,
            _ => HistoryStatus::InProgress,
        };
        all.push(HistoryEntry::from_review(review, status));
    }

    if let Some(first) = by_week.keys().copied().filter(|w| *w < current).min() {
        let mut week = current - Duration::weeks(1);
        while week >= first {
            let entry = match by_week.get(&week) {
                Some(review) if review.is_completed() => {
                    HistoryEntry::from_review(review, HistoryStatus::Complete)
                }
                Some(review) => HistoryEntry::from_review(review, HistoryStatus::Missed),
                None => HistoryEntry::missed(week_info(week)),
            };
            all.push(entry);
            week = week - Duration::weeks(1);
        }
    }

    let complete_count = all.iter().filter(|e| e.status == HistoryStatus::Complete).count();
    let missed_count = all.iter().filter(|e| e.status == HistoryStatus::Missed).count();

    let needle = query
        .q
        .as_deref()
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty());

    let entries = all
        .into_iter()
        .filter(|e| query.status.admits(e.status))
        .filter(|e| needle.as_deref().map_or(true, |n| e.matches_text(n)))
        .collect();

    HistoryPage {
        entries,
        complete_count,
        missed_count,
    }
}
