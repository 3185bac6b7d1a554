//! Assembles the application router from the handlers and the auth gate.

use std::sync::Arc;

use axum::{
    extract::Query,
    middleware,
    response::Redirect,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::application::{
    CompleteReviewHandler, ExportDataHandler, GetCurrentReviewHandler, GetDashboardHandler,
    GetInsightsHandler, GetReviewDetailHandler, GetSettingsHandler, ListHistoryHandler,
    SavePolicy, SaveStepHandler, StartReviewHandler, UpdateSettingsHandler,
};
use crate::ports::{EventPublisher, ReviewRepository, SettingsRepository, StreakRepository};

use super::dashboard::{dashboard_routes, DashboardHandlers};
use super::history::{history_routes, HistoryHandlers};
use super::insights::{insights_routes, InsightsHandlers};
use super::middleware::{auth_middleware, route_guard, AuthState, GuardState};
use super::review::{review_routes, ReviewHandlers};
use super::settings::{settings_routes, SettingsHandlers};

/// Storage and event ports the API runs on.
#[derive(Clone)]
pub struct Ports {
    pub reviews: Arc<dyn ReviewRepository>,
    pub streaks: Arc<dyn StreakRepository>,
    pub settings: Arc<dyn SettingsRepository>,
    pub publisher: Arc<dyn EventPublisher>,
}

/// Handler state for every API area.
#[derive(Clone)]
pub struct ApiHandlers {
    pub review: ReviewHandlers,
    pub dashboard: DashboardHandlers,
    pub history: HistoryHandlers,
    pub insights: InsightsHandlers,
    pub settings: SettingsHandlers,
}

impl ApiHandlers {
    pub fn new(ports: Ports, policy: SavePolicy, heatmap_weeks: usize) -> Self {
        let Ports {
            reviews,
            streaks,
            settings,
            publisher,
        } = ports;

        let review = ReviewHandlers::new(
            Arc::new(StartReviewHandler::new(reviews.clone(), publisher.clone(), policy)),
            Arc::new(GetCurrentReviewHandler::new(reviews.clone())),
            Arc::new(GetReviewDetailHandler::new(reviews.clone())),
            Arc::new(SaveStepHandler::new(reviews.clone(), publisher.clone(), policy)),
            Arc::new(CompleteReviewHandler::new(
                reviews.clone(),
                streaks.clone(),
                publisher,
                policy,
            )),
        );
        let dashboard = DashboardHandlers::new(
            Arc::new(GetDashboardHandler::new(
                reviews.clone(),
                streaks.clone(),
                settings.clone(),
                policy,
            )),
            heatmap_weeks,
        );

        Self {
            review,
            dashboard,
            history: HistoryHandlers::new(Arc::new(ListHistoryHandler::new(reviews.clone()))),
            insights: InsightsHandlers::new(Arc::new(GetInsightsHandler::new(reviews.clone()))),
            settings: SettingsHandlers::new(
                Arc::new(GetSettingsHandler::new(settings.clone())),
                Arc::new(UpdateSettingsHandler::new(settings.clone(), policy)),
                Arc::new(ExportDataHandler::new(reviews, streaks, settings)),
            ),
        }
    }
}

/// Full application router: `/api/*`, `/login`, `/health` and `/`, behind
/// session resolution and the route guard.
pub fn app_router(handlers: ApiHandlers, auth: AuthState, guard: GuardState) -> Router {
    let api = Router::new()
        .nest("/reviews", review_routes(handlers.review))
        .nest("/dashboard", dashboard_routes(handlers.dashboard))
        .nest("/history", history_routes(handlers.history))
        .nest("/insights", insights_routes(handlers.insights))
        .nest("/settings", settings_routes(handlers.settings));

    Router::new()
        .nest("/api", api)
        .route("/", get(|| async { Redirect::to("/api/dashboard") }))
        .route("/login", get(login))
        .route("/health", get(health))
        .layer(middleware::from_fn_with_state(guard, route_guard))
        .layer(middleware::from_fn_with_state(auth, auth_middleware))
}

#[derive(Debug, Default, Deserialize)]
struct LoginParams {
    next: Option<String>,
}

/// GET /login - Entry point for anonymous users. Sign-in itself happens at
/// the identity provider; this only tells the client where to return.
async fn login(Query(params): Query<LoginParams>) -> Json<serde_json::Value> {
    let next = params
        .next
        .filter(|n| n.starts_with('/') && !n.starts_with("//"))
        .unwrap_or_else(|| "/".to_string());
    Json(serde_json::json!({
        "message": "Sign in to start your weekly review",
        "next": next
    }))
}

/// GET /health
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
