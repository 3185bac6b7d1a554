//! HTTP DTOs for settings and data export.

use serde::Serialize;

use crate::adapters::http::review::ReviewResponse;
use crate::application::UserExport;
use crate::domain::foundation::Timestamp;
use crate::domain::reminder::ReviewSettings;
use crate::domain::streak::Streak;

#[derive(Debug, Clone, Serialize)]
pub struct SettingsResponse {
    #[serde(flatten)]
    pub settings: ReviewSettings,
    /// e.g. `"Sunday, 5pm"`.
    pub next_review_label: String,
}

impl From<ReviewSettings> for SettingsResponse {
    fn from(settings: ReviewSettings) -> Self {
        Self {
            next_review_label: settings.next_review_label(),
            settings,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportResponse {
    pub user_id: String,
    pub exported_at: Timestamp,
    pub settings: ReviewSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streak: Option<Streak>,
    pub reviews: Vec<ReviewResponse>,
}

impl From<UserExport> for ExportResponse {
    fn from(export: UserExport) -> Self {
        Self {
            user_id: export.user_id.to_string(),
            exported_at: export.exported_at,
            settings: export.settings,
            streak: export.streak,
            reviews: export.reviews.iter().map(ReviewResponse::from).collect(),
        }
    }
}
