//! HTTP adapter for settings and data export.

mod dto;
mod handlers;
mod routes;

pub use dto::{ExportResponse, SettingsResponse};
pub use handlers::SettingsHandlers;
pub use routes::settings_routes;
