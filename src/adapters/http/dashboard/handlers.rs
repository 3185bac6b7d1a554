//! HTTP handlers for the dashboard.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::{DashboardView, GetDashboardHandler, GetDashboardQuery};
use crate::domain::foundation::Timestamp;

#[derive(Clone)]
pub struct DashboardHandlers {
    dashboard: Arc<GetDashboardHandler>,
    heatmap_weeks: usize,
}

impl DashboardHandlers {
    pub fn new(dashboard: Arc<GetDashboardHandler>, heatmap_weeks: usize) -> Self {
        Self {
            dashboard,
            heatmap_weeks,
        }
    }
}

/// GET /api/dashboard - Streak summary, heatmap and the review call to action
pub async fn get_dashboard(
    State(handlers): State<DashboardHandlers>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<DashboardView>, ApiError> {
    let view = handlers
        .dashboard
        .handle(GetDashboardQuery {
            user_id: user.id,
            now: Timestamp::now(),
            heatmap_weeks: handlers.heatmap_weeks,
        })
        .await?;

    Ok(Json(view))
}
