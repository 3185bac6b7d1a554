//! Dashboard query handler.

mod get_dashboard;

pub use get_dashboard::{
    DashboardView, GetDashboardHandler, GetDashboardQuery, ReviewCallToAction, StreakSummary,
};
