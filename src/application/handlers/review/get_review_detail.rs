//! GetReviewDetailHandler - one review by id, for its owner only.

use std::sync::Arc;

use thiserror::Error;

use super::find_owned_review;
use crate::domain::foundation::{DomainError, ReviewId, UserId};
use crate::domain::review::Review;
use crate::ports::ReviewRepository;

/// Query for a single review.
#[derive(Debug, Clone)]
pub struct GetReviewDetailQuery {
    pub user_id: UserId,
    pub review_id: ReviewId,
}

#[derive(Debug, Error)]
pub enum ReviewDetailError {
    #[error("Review not found: {0}")]
    NotFound(ReviewId),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

pub struct GetReviewDetailHandler {
    reviews: Arc<dyn ReviewRepository>,
}

impl GetReviewDetailHandler {
    pub fn new(reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { reviews }
    }

    pub async fn handle(&self, query: GetReviewDetailQuery) -> Result<Review, ReviewDetailError> {
        find_owned_review(self.reviews.as_ref(), &query.user_id, &query.review_id)
            .await?
            .ok_or(ReviewDetailError::NotFound(query.review_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{completed_review, user, Harness};

    #[tokio::test]
    async fn owner_sees_review() {
        let h = Harness::new();
        let review = completed_review("2024-12-11");
        let id = review.id();
        h.reviews.insert(review).await;

        let found = GetReviewDetailHandler::new(h.reviews.clone())
            .handle(GetReviewDetailQuery {
                user_id: user(),
                review_id: id,
            })
            .await
            .unwrap();

        assert_eq!(found.id(), id);
    }

    #[tokio::test]
    async fn other_user_and_unknown_id_are_both_not_found() {
        let h = Harness::new();
        let review = completed_review("2024-12-11");
        let id = review.id();
        h.reviews.insert(review).await;
        let handler = GetReviewDetailHandler::new(h.reviews.clone());

        let foreign = handler
            .handle(GetReviewDetailQuery {
                user_id: UserId::new("user-2").unwrap(),
                review_id: id,
            })
            .await;
        let missing = handler
            .handle(GetReviewDetailQuery {
                user_id: user(),
                review_id: ReviewId::new(),
            })
            .await;

        assert!(matches!(foreign, Err(ReviewDetailError::NotFound(_))));
        assert!(matches!(missing, Err(ReviewDetailError::NotFound(_))));
    }
}
