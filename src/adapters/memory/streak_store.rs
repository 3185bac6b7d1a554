//! In-memory streak store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::SimulatedNetwork;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::streak::Streak;
use crate::ports::StreakRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryStreakStore {
    streaks: Arc<RwLock<HashMap<UserId, Streak>>>,
    network: Arc<SimulatedNetwork>,
}

impl InMemoryStreakStore {
    pub fn new(network: Arc<SimulatedNetwork>) -> Self {
        Self {
            streaks: Arc::new(RwLock::new(HashMap::new())),
            network,
        }
    }

    pub fn network(&self) -> &SimulatedNetwork {
        &self.network
    }
}

#[async_trait]
impl StreakRepository for InMemoryStreakStore {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Streak>, DomainError> {
        self.network.read().await;
        Ok(self.streaks.read().await.get(user_id).cloned())
    }

    async fn save(&self, streak: &Streak) -> Result<(), DomainError> {
        self.network.write("save_streak").await?;
        self.streaks
            .write()
            .await
            .insert(streak.user_id.clone(), streak.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn save_replaces_existing_record() {
        let store = InMemoryStreakStore::new(Arc::new(SimulatedNetwork::instant()));
        let user = UserId::new("user-1").unwrap();
        let mut streak = Streak::new(user.clone());
        store.save(&streak).await.unwrap();

        streak.record_completion(NaiveDate::from_ymd_opt(2024, 12, 15).unwrap());
        store.save(&streak).await.unwrap();

        let stored = store.find_by_user(&user).await.unwrap().unwrap();
        assert_eq!(stored.total_reviews, 1);
    }

    #[tokio::test]
    async fn unknown_user_has_no_streak() {
        let store = InMemoryStreakStore::new(Arc::new(SimulatedNetwork::instant()));
        let user = UserId::new("nobody").unwrap();

        assert!(store.find_by_user(&user).await.unwrap().is_none());
    }
}
