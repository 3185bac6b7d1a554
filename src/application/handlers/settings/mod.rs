//! Settings and data export handlers.

mod export_data;
mod get_settings;
mod update_settings;

pub use export_data::{ExportDataHandler, UserExport};
pub use get_settings::GetSettingsHandler;
pub use update_settings::{UpdateSettingsCommand, UpdateSettingsError, UpdateSettingsHandler};
