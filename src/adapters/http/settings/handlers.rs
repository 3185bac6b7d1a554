//! HTTP handlers for settings and data export.

use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::{
    ExportDataHandler, GetSettingsHandler, UpdateSettingsCommand, UpdateSettingsHandler,
};
use crate::domain::reminder::ReviewSettings;

use super::dto::{ExportResponse, SettingsResponse};

#[derive(Clone)]
pub struct SettingsHandlers {
    get: Arc<GetSettingsHandler>,
    update: Arc<UpdateSettingsHandler>,
    export: Arc<ExportDataHandler>,
}

impl SettingsHandlers {
    pub fn new(
        get: Arc<GetSettingsHandler>,
        update: Arc<UpdateSettingsHandler>,
        export: Arc<ExportDataHandler>,
    ) -> Self {
        Self {
            get,
            update,
            export,
        }
    }
}

/// GET /api/settings
pub async fn get_settings(
    State(handlers): State<SettingsHandlers>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<SettingsResponse>, ApiError> {
    let settings = handlers.get.handle(&user.id).await?;
    Ok(Json(settings.into()))
}

/// PUT /api/settings
pub async fn update_settings(
    State(handlers): State<SettingsHandlers>,
    RequireAuth(user): RequireAuth,
    Json(settings): Json<ReviewSettings>,
) -> Result<Json<SettingsResponse>, ApiError> {
    let saved = handlers
        .update
        .handle(UpdateSettingsCommand {
            user_id: user.id,
            settings,
        })
        .await?;
    Ok(Json(saved.into()))
}

/// GET /api/settings/export - Everything stored for the user, as a download
pub async fn export_data(
    State(handlers): State<SettingsHandlers>,
    RequireAuth(user): RequireAuth,
) -> Result<Response, ApiError> {
    let export = handlers.export.handle(&user.id).await?;
    tracing::info!(user_id = %user.id, reviews = export.reviews.len(), "data exported");

    Ok((
        [(
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"review-ritual-export.json\"",
        )],
        Json(ExportResponse::from(export)),
    )
        .into_response())
}
