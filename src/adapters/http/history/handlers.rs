//! HTTP handlers for review history.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::{ListHistoryHandler, ListHistoryQuery};
use crate::domain::foundation::Timestamp;
use crate::domain::review::{HistoryPage, HistoryQuery};

#[derive(Clone)]
pub struct HistoryHandlers {
    list: Arc<ListHistoryHandler>,
}

impl HistoryHandlers {
    pub fn new(list: Arc<ListHistoryHandler>) -> Self {
        Self { list }
    }
}

/// GET /api/history?status=all|complete|missed&q=text
pub async fn list_history(
    State(handlers): State<HistoryHandlers>,
    RequireAuth(user): RequireAuth,
    Query(filter): Query<HistoryQuery>,
) -> Result<Json<HistoryPage>, ApiError> {
    let page = handlers
        .list
        .handle(ListHistoryQuery {
            user_id: user.id,
            today: Timestamp::now().date(),
            filter,
        })
        .await?;

    Ok(Json(page))
}
