//! GetDashboardHandler - streak summary, heatmap, and the call to action
//! for this week's review.

use std::sync::Arc;

use serde::Serialize;

use crate::application::SavePolicy;
use crate::domain::calendar::{format_week_display, hours_remaining_in_week, week_info, WeekInfo};
use crate::domain::foundation::{DomainError, ReviewId, ReviewStatus, Timestamp, UserId};
use crate::domain::reminder::{plan_reminder, DueReminder};
use crate::domain::review::{Review, ReviewStep};
use crate::domain::streak::{next_milestone, Heatmap, Milestone, Streak, StreakStats};
use crate::ports::{ReviewRepository, SettingsRepository, StreakRepository};

const STREAK_RISK_HOURS: i64 = 24;

#[derive(Debug, Clone)]
pub struct GetDashboardQuery {
    pub user_id: UserId,
    pub now: Timestamp,
    pub heatmap_weeks: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreakSummary {
    /// Consecutive completed weeks ending last week. This week's review,
    /// done or not, never adds to it.
    pub current: u32,
    /// Durable running maximum, at least the longest run in history.
    pub longest: u32,
    /// Every completed review, this week's included.
    pub total: u32,
    pub completion_rate: u32,
    /// Rounded average over completed reviews; `None` before the first.
    pub avg_minutes: Option<u64>,
    pub next_milestone: Option<Milestone>,
}

/// What the dashboard's primary button says and where it leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewCallToAction {
    pub status: ReviewStatus,
    pub review_id: Option<ReviewId>,
    /// Steps saved, 0 to 5.
    pub progress: u8,
    pub label: String,
    /// Step the wizard should open on; `None` once complete.
    pub resume_step: Option<ReviewStep>,
}

impl ReviewCallToAction {
    fn for_review(review: Option<&Review>) -> Self {
        let Some(review) = review else {
            return Self {
                status: ReviewStatus::NotStarted,
                review_id: None,
                progress: 0,
                label: "Start This Week's Review".to_string(),
                resume_step: Some(ReviewStep::FIRST),
            };
        };

        let progress = review.progress();
        let (label, resume_step) = match review.status() {
            ReviewStatus::Completed => ("Review Complete ✓".to_string(), None),
            ReviewStatus::InProgress => (
                format!("Continue Review ({}/5)", progress),
                Some(review.current_step()),
            ),
            ReviewStatus::NotStarted => (
                "Start This Week's Review".to_string(),
                Some(ReviewStep::FIRST),
            ),
        };

        Self {
            status: review.status(),
            review_id: Some(review.id()),
            progress,
            label,
            resume_step,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub week: WeekInfo,
    pub week_display: String,
    pub streak: StreakSummary,
    pub heatmap: Heatmap,
    pub current_review: ReviewCallToAction,
    pub hours_remaining: i64,
    pub streak_at_risk: bool,
    pub next_review: String,
    pub due_reminder: Option<DueReminder>,
}

pub struct GetDashboardHandler {
    reviews: Arc<dyn ReviewRepository>,
    streaks: Arc<dyn StreakRepository>,
    settings: Arc<dyn SettingsRepository>,
    policy: SavePolicy,
}

impl GetDashboardHandler {
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        streaks: Arc<dyn StreakRepository>,
        settings: Arc<dyn SettingsRepository>,
        policy: SavePolicy,
    ) -> Self {
        Self {
            reviews,
            streaks,
            settings,
            policy,
        }
    }

    pub async fn handle(&self, query: GetDashboardQuery) -> Result<DashboardView, DomainError> {
        let today = query.now.date();
        let week = week_info(today);

        let reviews = self.reviews.list_by_user(&query.user_id).await?;
        let completed: Vec<&Review> = reviews.iter().filter(|r| r.is_completed()).collect();
        let current = reviews
            .iter()
            .find(|r| r.week().week_start == week.week_start);

        let streak = self
            .current_streak(&query.user_id, &completed, today)
            .await?;
        let settings = self
            .settings
            .find_by_user(&query.user_id)
            .await?
            .unwrap_or_default();

        let current_review = ReviewCallToAction::for_review(current);
        let reviewed = current_review.status == ReviewStatus::Completed;
        let stats = StreakStats::compute(completed.iter().map(|r| r.week().week_start), today);
        let current_streak = stats.current_streak;
        let hours_remaining = hours_remaining_in_week(*query.now.as_datetime());

        let avg_minutes = if completed.is_empty() {
            None
        } else {
            let total: u64 = completed.iter().map(|r| r.time_spent_seconds()).sum();
            let count = completed.len() as u64;
            Some((total + count * 30) / (count * 60))
        };

        Ok(DashboardView {
            week,
            week_display: format_week_display(week.week_start),
            streak: StreakSummary {
                current: current_streak,
                longest: streak.longest_streak.max(stats.longest_streak),
                total: streak.total_reviews,
                completion_rate: streak.completion_rate(today),
                avg_minutes,
                next_milestone: next_milestone(current_streak),
            },
            heatmap: Heatmap::build(
                today,
                completed.iter().map(|r| r.week().week_start),
                query.heatmap_weeks,
            ),
            current_review,
            hours_remaining,
            streak_at_risk: !reviewed && hours_remaining < STREAK_RISK_HOURS,
            next_review: settings.next_review_label(),
            due_reminder: plan_reminder(
                &settings,
                *query.now.as_datetime(),
                reviewed,
                current_streak,
            ),
        })
    }

    /// Loads the stored streak, resetting it if a week went by unreviewed.
    /// Users without a stored record get one rebuilt from their reviews.
    async fn current_streak(
        &self,
        user_id: &UserId,
        completed: &[&Review],
        today: chrono::NaiveDate,
    ) -> Result<Streak, DomainError> {
        let Some(mut streak) = self.streaks.find_by_user(user_id).await? else {
            return Ok(Streak::rebuild(
                user_id.clone(),
                completed.iter().map(|r| r.week().week_start),
                today,
            ));
        };

        if streak.reconcile(today) {
            tracing::info!(user_id = %user_id, "streak broken by a missed week");
            if let Err(failure) = self
                .policy
                .run("save_streak", || self.streaks.save(&streak))
                .await
            {
                tracing::warn!(user_id = %user_id, error = %failure, "reset streak not saved");
            }
        }
        Ok(streak)
    }
}
