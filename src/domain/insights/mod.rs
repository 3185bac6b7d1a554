//! Periodic insights over completed reviews.

mod period;
mod report;

pub use period::{Period, Timeframe};
pub use report::{DeliverableSummary, InsightReport, PersonSupport};
