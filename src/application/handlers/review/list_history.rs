//! ListHistoryHandler - past weeks with their review outcome.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::review::{build_history, HistoryPage, HistoryQuery};
use crate::ports::ReviewRepository;

#[derive(Debug, Clone)]
pub struct ListHistoryQuery {
    pub user_id: UserId,
    pub today: NaiveDate,
    pub filter: HistoryQuery,
}

pub struct ListHistoryHandler {
    reviews: Arc<dyn ReviewRepository>,
}

impl ListHistoryHandler {
    pub fn new(reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { reviews }
    }

    pub async fn handle(&self, query: ListHistoryQuery) -> Result<HistoryPage, DomainError> {
        let reviews = self.reviews.list_by_user(&query.user_id).await?;
        Ok(build_history(&reviews, query.today, &query.filter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{completed_review, date, user, Harness};
    use crate::domain::review::{HistoryFilter, HistoryStatus};

    #[tokio::test]
    async fn includes_missed_weeks_between_reviews() {
        let h = Harness::new();
        h.reviews.insert(completed_review("2024-12-01")).await;
        h.reviews.insert(completed_review("2024-12-15")).await;
        let handler = ListHistoryHandler::new(h.reviews.clone());

        let page = handler
            .handle(ListHistoryQuery {
                user_id: user(),
                today: date("2024-12-23"),
                filter: HistoryQuery::default(),
            })
            .await
            .unwrap();

        let statuses: Vec<HistoryStatus> = page.entries.iter().map(|e| e.status).collect();
        assert_eq!(
            statuses,
            vec![HistoryStatus::Complete, HistoryStatus::Missed, HistoryStatus::Complete]
        );
        assert_eq!(page.complete_count, 2);
        assert_eq!(page.missed_count, 1);
    }

    #[tokio::test]
    async fn missed_filter_keeps_counts() {
        let h = Harness::new();
        h.reviews.insert(completed_review("2024-12-01")).await;
        h.reviews.insert(completed_review("2024-12-15")).await;

        let page = ListHistoryHandler::new(h.reviews.clone())
            .handle(ListHistoryQuery {
                user_id: user(),
                today: date("2024-12-23"),
                filter: HistoryQuery {
                    status: HistoryFilter::Missed,
                    q: None,
                },
            })
            .await
            .unwrap();

        assert_eq!(page.entries.len(), 1);
        assert_eq!(page.complete_count, 2);
    }
}
