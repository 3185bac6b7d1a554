//! ExportDataHandler - everything stored for a user, for download.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::reminder::ReviewSettings;
use crate::domain::review::Review;
use crate::domain::streak::Streak;
use crate::ports::{ReviewRepository, SettingsRepository, StreakRepository};

#[derive(Debug, Clone)]
pub struct UserExport {
    pub user_id: UserId,
    pub exported_at: Timestamp,
    /// Newest week first.
    pub reviews: Vec<Review>,
    pub streak: Option<Streak>,
    pub settings: ReviewSettings,
}

pub struct ExportDataHandler {
    reviews: Arc<dyn ReviewRepository>,
    streaks: Arc<dyn StreakRepository>,
    settings: Arc<dyn SettingsRepository>,
}

impl ExportDataHandler {
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        streaks: Arc<dyn StreakRepository>,
        settings: Arc<dyn SettingsRepository>,
    ) -> Self {
        Self {
            reviews,
            streaks,
            settings,
        }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<UserExport, DomainError> {
        let reviews = self.reviews.list_by_user(user_id).await?;
        let streak = self.streaks.find_by_user(user_id).await?;
        let settings = self
            .settings
            .find_by_user(user_id)
            .await?
            .unwrap_or_default();

        tracing::info!(user_id = %user_id, reviews = reviews.len(), "user data exported");
        Ok(UserExport {
            user_id: user_id.clone(),
            exported_at: Timestamp::now(),
            reviews,
            streak,
            settings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{completed_review, review_through, user, Harness};

    #[tokio::test]
    async fn export_includes_every_review() {
        let h = Harness::new();
        h.reviews.insert(completed_review("2024-12-04")).await;
        h.reviews.insert(review_through("2024-12-18", 1)).await;
        let other = Review::new(
            UserId::new("user-2").unwrap(),
            crate::domain::calendar::week_info(chrono::NaiveDate::from_ymd_opt(2024, 12, 18).unwrap()),
        );
        h.reviews.insert(other).await;

        let export = ExportDataHandler::new(h.reviews.clone(), h.streaks.clone(), h.settings.clone())
            .handle(&user())
            .await
            .unwrap();

        assert_eq!(export.reviews.len(), 2);
        assert!(export.streak.is_none());
        assert_eq!(export.settings, ReviewSettings::default());
    }
}
