//! GetCurrentReviewHandler - the user's review for the week containing today.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::calendar::week_start;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::review::Review;
use crate::ports::ReviewRepository;

#[derive(Debug, Clone)]
pub struct GetCurrentReviewQuery {
    pub user_id: UserId,
    pub today: NaiveDate,
}

pub struct GetCurrentReviewHandler {
    reviews: Arc<dyn ReviewRepository>,
}

impl GetCurrentReviewHandler {
    pub fn new(reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { reviews }
    }

    pub async fn handle(&self, query: GetCurrentReviewQuery) -> Result<Option<Review>, DomainError> {
        self.reviews
            .find_by_week(&query.user_id, week_start(query.today))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{date, review_through, user, Harness};

    #[tokio::test]
    async fn finds_review_by_containing_week() {
        let h = Harness::new();
        let review = review_through("2024-12-15", 1);
        let id = review.id();
        h.reviews.insert(review).await;
        let handler = GetCurrentReviewHandler::new(h.reviews.clone());

        let found = handler
            .handle(GetCurrentReviewQuery {
                user_id: user(),
                today: date("2024-12-21"),
            })
            .await
            .unwrap();
        let next_week = handler
            .handle(GetCurrentReviewQuery {
                user_id: user(),
                today: date("2024-12-22"),
            })
            .await
            .unwrap();

        assert_eq!(found.map(|r| r.id()), Some(id));
        assert!(next_week.is_none());
    }
}
