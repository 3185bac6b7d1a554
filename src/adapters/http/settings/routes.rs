//! HTTP routes for settings.

use axum::{routing::get, Router};

use super::handlers::{export_data, get_settings, update_settings, SettingsHandlers};

/// Settings routes, mounted under `/api/settings`.
pub fn settings_routes(handlers: SettingsHandlers) -> Router {
    Router::new()
        .route("/", get(get_settings).put(update_settings))
        .route("/export", get(export_data))
        .with_state(handlers)
}
