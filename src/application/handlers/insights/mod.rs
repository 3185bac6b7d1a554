//! Insights query handler.

mod get_insights;

pub use get_insights::{GetInsightsHandler, GetInsightsQuery};
