//! Week-by-week completion grid.

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::BTreeSet;

use crate::domain::calendar::{week_info, week_start, WeekInfo};

/// Three rows of seven.
pub const DEFAULT_HEATMAP_WEEKS: usize = 21;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekStatus {
    Complete,
    Missed,
    Future,
    Current,
}

impl WeekStatus {
    /// Only complete and current weeks link to a review.
    pub fn is_navigable(self) -> bool {
        matches!(self, WeekStatus::Complete | WeekStatus::Current)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeatmapCell {
    #[serde(flatten)]
    pub week: WeekInfo,
    pub status: WeekStatus,
    pub navigable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heatmap {
    /// Oldest first.
    pub cells: Vec<HeatmapCell>,
}

impl Heatmap {
    /// `weeks` cells ending at the week containing `today`.
    pub fn build<I>(today: NaiveDate, completed_weeks: I, weeks: usize) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        Self::build_window(today, completed_weeks, weeks, 0)
    }

    /// Like `build`, followed by `upcoming` future weeks.
    pub fn build_window<I>(today: NaiveDate, completed_weeks: I, weeks: usize, upcoming: usize) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let completed: BTreeSet<NaiveDate> = completed_weeks.into_iter().map(week_start).collect();
        let current = week_start(today);
        let first = current - Duration::weeks(weeks.saturating_sub(1) as i64);

        let cells = (0..weeks + upcoming)
            .map(|index| {
                let start = first + Duration::weeks(index as i64);
                let status = if index >= weeks {
                    WeekStatus::Future
                } else if start == current {
                    WeekStatus::Current
                } else if completed.contains(&start) {
                    WeekStatus::Complete
                } else {
                    WeekStatus::Missed
                };
                HeatmapCell {
                    week: week_info(start),
                    status,
                    navigable: status.is_navigable(),
                }
            })
            .collect();

        Self { cells }
    }

    /// Builds from weeks-ago offsets (`-1` is last week) when no review
    /// records are at hand.
    pub fn from_offsets(today: NaiveDate, offsets: &[i64], weeks: usize) -> Self {
        Self::build(today, offsets_to_weeks(today, offsets), weeks)
    }

    pub fn count(&self, status: WeekStatus) -> usize {
        self.cells.iter().filter(|c| c.status == status).count()
    }
}

/// Week starts for weeks-ago offsets relative to the week containing `today`.
pub fn offsets_to_weeks(today: NaiveDate, offsets: &[i64]) -> Vec<NaiveDate> {
    let current = week_start(today);
    offsets
        .iter()
        .map(|offset| current + Duration::weeks(*offset))
        .collect()
}
