//! HTTP routes for review history.

use axum::{routing::get, Router};

use super::handlers::{list_history, HistoryHandlers};

/// History route, mounted at `/api/history`.
pub fn history_routes(handlers: HistoryHandlers) -> Router {
    Router::new()
        .route("/", get(list_history))
        .with_state(handlers)
}
