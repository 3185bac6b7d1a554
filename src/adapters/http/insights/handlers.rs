//! HTTP handlers for insights.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::{GetInsightsHandler, GetInsightsQuery};
use crate::domain::foundation::Timestamp;

use super::dto::{InsightsParams, InsightsResponse};

#[derive(Clone)]
pub struct InsightsHandlers {
    insights: Arc<GetInsightsHandler>,
}

impl InsightsHandlers {
    pub fn new(insights: Arc<GetInsightsHandler>) -> Self {
        Self { insights }
    }
}

/// GET /api/insights?timeframe=&date=
pub async fn get_insights(
    State(handlers): State<InsightsHandlers>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<InsightsParams>,
) -> Result<Json<InsightsResponse>, ApiError> {
    let today = Timestamp::now().date();
    let report = handlers
        .insights
        .handle(GetInsightsQuery {
            user_id: user.id,
            timeframe: params.timeframe,
            anchor: params.date.unwrap_or(today),
            today,
        })
        .await?;

    Ok(Json(InsightsResponse::new(report, today)))
}
