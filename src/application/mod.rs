//! Application layer - Commands, Queries, and Handlers.
//!
//! Orchestrates domain operations over the ports. Writes go through a
//! `SavePolicy`; the wizard controller drives the pure wizard reducer
//! against the review handlers.

pub mod handlers;
mod save_policy;
mod wizard_controller;

pub use handlers::{
    // Review handlers
    CompleteReviewCommand, CompleteReviewError, CompleteReviewHandler, CompleteReviewResult,
    GetCurrentReviewHandler, GetCurrentReviewQuery, GetReviewDetailHandler, GetReviewDetailQuery,
    ListHistoryHandler, ListHistoryQuery, ReviewDetailError, SaveStepCommand, SaveStepError,
    SaveStepHandler, SaveStepResult, StartReviewCommand, StartReviewError, StartReviewHandler,
    StartReviewResult,
    // Dashboard and insights
    DashboardView, GetDashboardHandler, GetDashboardQuery, GetInsightsHandler, GetInsightsQuery,
    ReviewCallToAction, StreakSummary,
    // Settings
    ExportDataHandler, GetSettingsHandler, UpdateSettingsCommand, UpdateSettingsError,
    UpdateSettingsHandler, UserExport,
};
pub use save_policy::{PersistenceFailure, SavePolicy};
pub use wizard_controller::{AdvanceOutcome, WizardController};
