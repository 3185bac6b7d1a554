//! GetInsightsHandler - monthly, quarterly, or yearly review aggregates.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::insights::{InsightReport, Period, Timeframe};
use crate::ports::ReviewRepository;

#[derive(Debug, Clone)]
pub struct GetInsightsQuery {
    pub user_id: UserId,
    pub timeframe: Timeframe,
    /// Any date inside the wanted period; defaults to today upstream.
    pub anchor: NaiveDate,
    pub today: NaiveDate,
}

pub struct GetInsightsHandler {
    reviews: Arc<dyn ReviewRepository>,
}

impl GetInsightsHandler {
    pub fn new(reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { reviews }
    }

    pub async fn handle(&self, query: GetInsightsQuery) -> Result<InsightReport, DomainError> {
        let period = Period::containing(query.timeframe, query.anchor);
        let reviews = self.reviews.list_by_user(&query.user_id).await?;
        Ok(InsightReport::compute(&reviews, period, query.today))
    }
}
