//! HTTP routes for insights.

use axum::{routing::get, Router};

use super::handlers::{get_insights, InsightsHandlers};

/// Insights route, mounted at `/api/insights`.
pub fn insights_routes(handlers: InsightsHandlers) -> Router {
    Router::new()
        .route("/", get(get_insights))
        .with_state(handlers)
}
