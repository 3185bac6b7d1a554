//! HTTP DTOs for insights.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::insights::{InsightReport, Timeframe};

/// `?timeframe=monthly|quarterly|yearly&date=YYYY-MM-DD`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InsightsParams {
    #[serde(default)]
    pub timeframe: Timeframe,
    /// Any date inside the wanted period. Defaults to today.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InsightsResponse {
    #[serde(flatten)]
    pub report: InsightReport,
    /// Anchor for the previous period's page.
    pub previous: NaiveDate,
    /// Anchor for the next period's page; absent for the current period.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<NaiveDate>,
}

impl InsightsResponse {
    pub fn new(report: InsightReport, today: NaiveDate) -> Self {
        let next = report.period.next();
        Self {
            previous: report.period.previous().start,
            next: (next.start <= today).then_some(next.start),
            report,
        }
    }
}
