//! In-memory review store.
//!
//! Stands in for the database during development and tests. Every call pays
//! the simulated round trip; writes can be made to fail on demand.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::SimulatedNetwork;
use crate::domain::foundation::{DomainError, ErrorCode, ReviewId, UserId};
use crate::domain::review::{Review, ReviewStep};
use crate::ports::ReviewRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryReviewStore {
    reviews: Arc<RwLock<HashMap<ReviewId, Review>>>,
    network: Arc<SimulatedNetwork>,
}

impl InMemoryReviewStore {
    pub fn new(network: Arc<SimulatedNetwork>) -> Self {
        Self {
            reviews: Arc::new(RwLock::new(HashMap::new())),
            network,
        }
    }

    pub fn network(&self) -> &SimulatedNetwork {
        &self.network
    }

    /// Seeds a review without latency or failure injection.
    pub async fn insert(&self, review: Review) {
        self.reviews.write().await.insert(review.id(), review);
    }

    pub async fn len(&self) -> usize {
        self.reviews.read().await.len()
    }

    async fn replace(&self, review: &Review, operation: &str) -> Result<(), DomainError> {
        self.network.write(operation).await?;
        let mut reviews = self.reviews.write().await;
        match reviews.get_mut(&review.id()) {
            Some(stored) => {
                *stored = review.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::ReviewNotFound,
                format!("Review {} does not exist", review.id()),
            )),
        }
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviewStore {
    async fn create(&self, review: &Review) -> Result<(), DomainError> {
        self.network.write("create_review").await?;
        let mut reviews = self.reviews.write().await;
        let duplicate = reviews.values().any(|r| {
            r.user_id() == review.user_id() && r.week().week_start == review.week().week_start
        });
        if duplicate {
            return Err(DomainError::new(
                ErrorCode::ReviewAlreadyExists,
                format!("A review for week of {} already exists", review.week().week_start),
            ));
        }
        reviews.insert(review.id(), review.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, DomainError> {
        self.network.read().await;
        Ok(self.reviews.read().await.get(id).cloned())
    }

    async fn find_by_week(
        &self,
        user_id: &UserId,
        week_start: NaiveDate,
    ) -> Result<Option<Review>, DomainError> {
        self.network.read().await;
        Ok(self
            .reviews
            .read()
            .await
            .values()
            .find(|r| r.user_id() == user_id && r.week().week_start == week_start)
            .cloned())
    }

    async fn save_step_payload(&self, review: &Review, step: ReviewStep) -> Result<(), DomainError> {
        self.replace(review, &format!("save_step_{}", step.number()))
            .await
    }

    async fn complete_review(&self, review: &Review) -> Result<(), DomainError> {
        self.replace(review, "complete_review").await
    }

    async fn list_completed_weeks(&self, user_id: &UserId) -> Result<Vec<NaiveDate>, DomainError> {
        self.network.read().await;
        let mut weeks: Vec<NaiveDate> = self
            .reviews
            .read()
            .await
            .values()
            .filter(|r| r.user_id() == user_id && r.is_completed())
            .map(|r| r.week().week_start)
            .collect();
        weeks.sort();
        Ok(weeks)
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Review>, DomainError> {
        self.network.read().await;
        let mut reviews: Vec<Review> = self
            .reviews
            .read()
            .await
            .values()
            .filter(|r| r.user_id() == user_id)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.week().week_start.cmp(&a.week().week_start));
        Ok(reviews)
    }
}
