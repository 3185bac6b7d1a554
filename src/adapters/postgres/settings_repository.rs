//! PostgreSQL implementation of SettingsRepository.

use async_trait::async_trait;
use chrono::NaiveTime;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::reminder::ReviewSettings;
use crate::ports::SettingsRepository;

/// PostgreSQL implementation of SettingsRepository.
#[derive(Clone)]
pub struct PostgresSettingsRepository {
    pool: PgPool,
}

impl PostgresSettingsRepository {
    /// Creates a new PostgresSettingsRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsRepository for PostgresSettingsRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<ReviewSettings>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT review_day, review_time, timezone, push_enabled,
                   email_reminders, escalation_enabled
            FROM review_settings WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch settings: {}", e)))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let get_err = |e: sqlx::Error| DomainError::database(format!("Failed to read settings: {}", e));
        let review_day: i16 = row.try_get("review_day").map_err(get_err)?;
        let review_time: NaiveTime = row.try_get("review_time").map_err(get_err)?;

        Ok(Some(ReviewSettings {
            review_day: u8::try_from(review_day).unwrap_or_default(),
            review_time,
            timezone: row.try_get("timezone").map_err(get_err)?,
            push_enabled: row.try_get("push_enabled").map_err(get_err)?,
            email_reminders: row.try_get("email_reminders").map_err(get_err)?,
            escalation_enabled: row.try_get("escalation_enabled").map_err(get_err)?,
        }))
    }

    async fn save(&self, user_id: &UserId, settings: &ReviewSettings) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO review_settings (
                user_id, review_day, review_time, timezone, push_enabled,
                email_reminders, escalation_enabled, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
            ON CONFLICT (user_id) DO UPDATE SET
                review_day = EXCLUDED.review_day,
                review_time = EXCLUDED.review_time,
                timezone = EXCLUDED.timezone,
                push_enabled = EXCLUDED.push_enabled,
                email_reminders = EXCLUDED.email_reminders,
                escalation_enabled = EXCLUDED.escalation_enabled,
                updated_at = NOW()
            "#,
        )
        .bind(user_id.as_str())
        .bind(i16::from(settings.review_day))
        .bind(settings.review_time)
        .bind(&settings.timezone)
        .bind(settings.push_enabled)
        .bind(settings.email_reminders)
        .bind(settings.escalation_enabled)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to save settings: {}", e)))?;

        Ok(())
    }
}
