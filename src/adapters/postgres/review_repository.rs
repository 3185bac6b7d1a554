//! PostgreSQL implementation of ReviewRepository.
//!
//! One row per review; each step payload lives in its own JSONB column so a
//! step save touches only that column.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::calendar::WeekInfo;
use crate::domain::foundation::{
    DomainError, ErrorCode, ReviewId, ReviewStatus, Timestamp, UserId,
};
use crate::domain::review::{Review, ReviewDraft, ReviewStep};
use crate::ports::ReviewRepository;

const SELECT_REVIEW: &str = r#"
    SELECT id, user_id, week_start, week_number, year, status, current_step,
           clear_decks, commitments, look_ahead, protect_time, reflection,
           started_at, completed_at, time_spent_seconds, created_at, updated_at
    FROM reviews
"#;

/// PostgreSQL implementation of ReviewRepository.
#[derive(Clone)]
pub struct PostgresReviewRepository {
    pool: PgPool,
}

impl PostgresReviewRepository {
    /// Creates a new PostgresReviewRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for PostgresReviewRepository {
    async fn create(&self, review: &Review) -> Result<(), DomainError> {
        let draft = review.draft();
        sqlx::query(
            r#"
            INSERT INTO reviews (
                id, user_id, week_start, week_number, year, status, current_step,
                clear_decks, commitments, look_ahead, protect_time, reflection,
                started_at, completed_at, time_spent_seconds, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(review.id().as_uuid())
        .bind(review.user_id().as_str())
        .bind(review.week().week_start)
        .bind(review.week().week_number as i32)
        .bind(review.week().year)
        .bind(review.status().as_str())
        .bind(i16::from(review.current_step().number()))
        .bind(to_json(&draft.clear_decks)?)
        .bind(to_json(&draft.commitments)?)
        .bind(to_json(&draft.look_ahead)?)
        .bind(to_json(&draft.protect_time)?)
        .bind(to_json(&draft.reflection)?)
        .bind(review.started_at().map(|t| *t.as_datetime()))
        .bind(review.completed_at().map(|t| *t.as_datetime()))
        .bind(review.time_spent_seconds() as i64)
        .bind(review.created_at().as_datetime())
        .bind(review.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => DomainError::new(
                ErrorCode::ReviewAlreadyExists,
                format!("A review for week of {} already exists", review.week().week_start),
            ),
            other => DomainError::database(format!("Failed to insert review: {}", other)),
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_REVIEW))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to fetch review: {}", e)))?;

        row.map(row_to_review).transpose()
    }

    async fn find_by_week(
        &self,
        user_id: &UserId,
        week_start: NaiveDate,
    ) -> Result<Option<Review>, DomainError> {
        let row = sqlx::query(&format!(
            "{} WHERE user_id = $1 AND week_start = $2",
            SELECT_REVIEW
        ))
        .bind(user_id.as_str())
        .bind(week_start)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch review: {}", e)))?;

        row.map(row_to_review).transpose()
    }

    async fn save_step_payload(&self, review: &Review, step: ReviewStep) -> Result<(), DomainError> {
        let payload = review.draft().payload(step).to_json();
        // Column name comes from a closed match, never from input.
        let sql = format!(
            r#"
            UPDATE reviews SET
                {} = $2,
                status = $3,
                current_step = $4,
                started_at = $5,
                updated_at = $6
            WHERE id = $1
            "#,
            payload_column(step)
        );

        let result = sqlx::query(&sql)
            .bind(review.id().as_uuid())
            .bind(payload)
            .bind(review.status().as_str())
            .bind(i16::from(review.current_step().number()))
            .bind(review.started_at().map(|t| *t.as_datetime()))
            .bind(review.updated_at().as_datetime())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to save {}: {}", step, e)))?;

        if result.rows_affected() == 0 {
            return Err(not_found(review.id()));
        }
        Ok(())
    }

    async fn complete_review(&self, review: &Review) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE reviews SET
                reflection = $2,
                status = $3,
                current_step = $4,
                completed_at = $5,
                time_spent_seconds = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(review.id().as_uuid())
        .bind(to_json(&review.draft().reflection)?)
        .bind(review.status().as_str())
        .bind(i16::from(review.current_step().number()))
        .bind(review.completed_at().map(|t| *t.as_datetime()))
        .bind(review.time_spent_seconds() as i64)
        .bind(review.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to complete review: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(not_found(review.id()));
        }
        Ok(())
    }

    async fn list_completed_weeks(&self, user_id: &UserId) -> Result<Vec<NaiveDate>, DomainError> {
        let rows: Vec<(NaiveDate,)> = sqlx::query_as(
            r#"
            SELECT week_start FROM reviews
            WHERE user_id = $1 AND status = 'completed'
            ORDER BY week_start ASC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list completed weeks: {}", e)))?;

        Ok(rows.into_iter().map(|(week,)| week).collect())
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Review>, DomainError> {
        let rows = sqlx::query(&format!(
            "{} WHERE user_id = $1 ORDER BY week_start DESC",
            SELECT_REVIEW
        ))
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list reviews: {}", e)))?;

        rows.into_iter().map(row_to_review).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn payload_column(step: ReviewStep) -> &'static str {
    match step {
        ReviewStep::ClearDecks => "clear_decks",
        ReviewStep::Commitments => "commitments",
        ReviewStep::LookAhead => "look_ahead",
        ReviewStep::ProtectTime => "protect_time",
        ReviewStep::Reflect => "reflection",
    }
}

fn not_found(id: ReviewId) -> DomainError {
    DomainError::new(ErrorCode::ReviewNotFound, format!("Review {} does not exist", id))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<JsonValue, DomainError> {
    serde_json::to_value(value)
        .map_err(|e| DomainError::new(ErrorCode::InternalError, format!("Failed to encode payload: {}", e)))
}

fn column<T>(row: &PgRow, name: &str) -> Result<T, DomainError>
where
    T: for<'r> sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(format!("Failed to get {}: {}", name, e)))
}

fn payload_column_value<T: DeserializeOwned>(row: &PgRow, name: &str) -> Result<T, DomainError> {
    let value: JsonValue = column(row, name)?;
    serde_json::from_value(value)
        .map_err(|e| DomainError::database(format!("Corrupt {} payload: {}", name, e)))
}

fn row_to_review(row: PgRow) -> Result<Review, DomainError> {
    let id: Uuid = column(&row, "id")?;
    let user_id: String = column(&row, "user_id")?;
    let status: String = column(&row, "status")?;
    let current_step: i16 = column(&row, "current_step")?;
    let week_number: i32 = column(&row, "week_number")?;
    let started_at: Option<DateTime<Utc>> = column(&row, "started_at")?;
    let completed_at: Option<DateTime<Utc>> = column(&row, "completed_at")?;
    let time_spent: i64 = column(&row, "time_spent_seconds")?;
    let created_at: DateTime<Utc> = column(&row, "created_at")?;
    let updated_at: DateTime<Utc> = column(&row, "updated_at")?;

    let week = WeekInfo {
        week_start: column(&row, "week_start")?,
        week_number: u32::try_from(week_number).unwrap_or_default(),
        year: column(&row, "year")?,
    };

    let draft = ReviewDraft {
        clear_decks: payload_column_value(&row, "clear_decks")?,
        commitments: payload_column_value(&row, "commitments")?,
        look_ahead: payload_column_value(&row, "look_ahead")?,
        protect_time: payload_column_value(&row, "protect_time")?,
        reflection: payload_column_value(&row, "reflection")?,
    };

    let user_id = UserId::new(user_id)
        .map_err(|e| DomainError::database(format!("Invalid user_id: {}", e)))?;
    let status: ReviewStatus = status
        .parse()
        .map_err(|e| DomainError::database(format!("Invalid review status: {}", e)))?;
    let current_step = u8::try_from(current_step)
        .ok()
        .and_then(|n| ReviewStep::from_number(n).ok())
        .ok_or_else(|| DomainError::database(format!("Invalid current_step: {}", current_step)))?;

    Review::reconstitute(
        ReviewId::from_uuid(id),
        user_id,
        week,
        status,
        current_step,
        draft,
        started_at.map(Timestamp::from_datetime),
        completed_at.map(Timestamp::from_datetime),
        u64::try_from(time_spent).unwrap_or_default(),
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    )
}
