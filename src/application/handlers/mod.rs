//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations over the
//! ports. One handler per use case, grouped by area.

pub mod dashboard;
pub mod insights;
pub mod review;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_support;

pub use dashboard::{
    DashboardView, GetDashboardHandler, GetDashboardQuery, ReviewCallToAction, StreakSummary,
};
pub use insights::{GetInsightsHandler, GetInsightsQuery};
pub use review::{
    CompleteReviewCommand, CompleteReviewError, CompleteReviewHandler, CompleteReviewResult,
    GetCurrentReviewHandler, GetCurrentReviewQuery, GetReviewDetailHandler, GetReviewDetailQuery,
    ListHistoryHandler, ListHistoryQuery, ReviewDetailError, SaveStepCommand, SaveStepError,
    SaveStepHandler, SaveStepResult, StartReviewCommand, StartReviewError, StartReviewHandler,
    StartReviewResult,
};
pub use settings::{
    ExportDataHandler, GetSettingsHandler, UpdateSettingsCommand, UpdateSettingsError,
    UpdateSettingsHandler, UserExport,
};
