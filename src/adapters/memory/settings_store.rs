//! In-memory settings store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::SimulatedNetwork;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::reminder::ReviewSettings;
use crate::ports::SettingsRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemorySettingsStore {
    settings: Arc<RwLock<HashMap<UserId, ReviewSettings>>>,
    network: Arc<SimulatedNetwork>,
}

impl InMemorySettingsStore {
    pub fn new(network: Arc<SimulatedNetwork>) -> Self {
        Self {
            settings: Arc::new(RwLock::new(HashMap::new())),
            network,
        }
    }
}

#[async_trait]
impl SettingsRepository for InMemorySettingsStore {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<ReviewSettings>, DomainError> {
        self.network.read().await;
        Ok(self.settings.read().await.get(user_id).cloned())
    }

    async fn save(&self, user_id: &UserId, settings: &ReviewSettings) -> Result<(), DomainError> {
        self.network.write("save_settings").await?;
        self.settings
            .write()
            .await
            .insert(user_id.clone(), settings.clone());
        Ok(())
    }
}
