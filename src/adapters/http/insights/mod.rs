//! HTTP adapter for insights.

mod dto;
mod handlers;
mod routes;

pub use dto::{InsightsParams, InsightsResponse};
pub use handlers::InsightsHandlers;
pub use routes::insights_routes;
