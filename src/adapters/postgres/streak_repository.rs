//! PostgreSQL implementation of StreakRepository.
//!
//! One row per user, upserted on every change.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::streak::Streak;
use crate::ports::StreakRepository;

/// PostgreSQL implementation of StreakRepository.
#[derive(Clone)]
pub struct PostgresStreakRepository {
    pool: PgPool,
}

impl PostgresStreakRepository {
    /// Creates a new PostgresStreakRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StreakRepository for PostgresStreakRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Streak>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT current_streak, longest_streak, total_reviews, missed_weeks,
                   last_completed_week, streak_started_at, updated_at
            FROM streaks WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch streak: {}", e)))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let count = |name: &str| -> Result<u32, DomainError> {
            let value: i32 = row
                .try_get(name)
                .map_err(|e| DomainError::database(format!("Failed to get {}: {}", name, e)))?;
            Ok(u32::try_from(value).unwrap_or_default())
        };
        let date = |name: &str| -> Result<Option<NaiveDate>, DomainError> {
            row.try_get(name)
                .map_err(|e| DomainError::database(format!("Failed to get {}: {}", name, e)))
        };
        let updated_at: DateTime<Utc> = row
            .try_get("updated_at")
            .map_err(|e| DomainError::database(format!("Failed to get updated_at: {}", e)))?;

        Ok(Some(Streak {
            user_id: user_id.clone(),
            current_streak: count("current_streak")?,
            longest_streak: count("longest_streak")?,
            total_reviews: count("total_reviews")?,
            missed_weeks: count("missed_weeks")?,
            last_completed_week: date("last_completed_week")?,
            streak_started_at: date("streak_started_at")?,
            updated_at: Timestamp::from_datetime(updated_at),
        }))
    }

    async fn save(&self, streak: &Streak) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO streaks (
                user_id, current_streak, longest_streak, total_reviews, missed_weeks,
                last_completed_week, streak_started_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id) DO UPDATE SET
                current_streak = EXCLUDED.current_streak,
                longest_streak = EXCLUDED.longest_streak,
                total_reviews = EXCLUDED.total_reviews,
                missed_weeks = EXCLUDED.missed_weeks,
                last_completed_week = EXCLUDED.last_completed_week,
                streak_started_at = EXCLUDED.streak_started_at,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(streak.user_id.as_str())
        .bind(streak.current_streak as i32)
        .bind(streak.longest_streak as i32)
        .bind(streak.total_reviews as i32)
        .bind(streak.missed_weeks as i32)
        .bind(streak.last_completed_week)
        .bind(streak.streak_started_at)
        .bind(streak.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to save streak: {}", e)))?;

        Ok(())
    }
}
