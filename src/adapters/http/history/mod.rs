//! HTTP adapter for review history.

mod handlers;
mod routes;

pub use handlers::HistoryHandlers;
pub use routes::history_routes;
