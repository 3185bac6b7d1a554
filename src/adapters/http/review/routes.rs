//! HTTP routes for review endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    get_current_review, get_review, save_review_step, start_review, validate_review_step,
    ReviewHandlers,
};

/// Review routes, mounted under `/api/reviews`.
pub fn review_routes(handlers: ReviewHandlers) -> Router {
    Router::new()
        .route("/current", get(get_current_review).post(start_review))
        .route("/:id", get(get_review))
        .route("/:id/steps/:step", post(save_review_step))
        .route("/:id/steps/:step/validate", post(validate_review_step))
        .with_state(handlers)
}
