//! Streak and heatmap engine.

mod heatmap;
mod milestones;
mod record;
mod stats;

pub use heatmap::{offsets_to_weeks, Heatmap, HeatmapCell, WeekStatus, DEFAULT_HEATMAP_WEEKS};
pub use milestones::{milestone_for, next_milestone, CompletionOutcome, Milestone, MILESTONES};
pub use record::Streak;
pub use stats::{completion_rate, StreakStats};
