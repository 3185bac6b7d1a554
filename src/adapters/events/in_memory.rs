//! In-memory event bus.
//!
//! Keeps the most recent envelopes and fans each one out to subscribers over
//! a `tokio::sync::broadcast` channel. `main` attaches a logging subscriber.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::{broadcast, RwLock};

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::EventPublisher;

const CHANNEL_CAPACITY: usize = 256;
const HISTORY_LIMIT: usize = 1024;

pub struct InMemoryEventBus {
    /// Oldest dropped first once `HISTORY_LIMIT` is reached.
    published: RwLock<VecDeque<EventEnvelope>>,
    sender: broadcast::Sender<EventEnvelope>,
    failing: AtomicBool,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            published: RwLock::new(VecDeque::new()),
            sender,
            failing: AtomicBool::new(false),
        }
    }

    /// Receives every envelope published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    /// While set, `publish` fails without recording anything.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    // === Test Helpers ===

    pub async fn published_events(&self) -> Vec<EventEnvelope> {
        self.published.read().await.iter().cloned().collect()
    }

    pub async fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.published
            .read()
            .await
            .iter()
            .filter(|e| e.event_type == event_type)
            .cloned()
            .collect()
    }

    pub async fn event_count(&self) -> usize {
        self.published.read().await.len()
    }

    pub async fn has_event(&self, event_type: &str) -> bool {
        self.published
            .read()
            .await
            .iter()
            .any(|e| e.event_type == event_type)
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                format!("Event bus unavailable for {}", event.event_type),
            ));
        }

        {
            let mut published = self.published.write().await;
            if published.len() == HISTORY_LIMIT {
                published.pop_front();
            }
            published.push_back(event.clone());
        }
        // No receivers is fine.
        let _ = self.sender.send(event);
        Ok(())
    }

    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}
