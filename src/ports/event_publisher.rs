//! Outbound port for review lifecycle events.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Fire-and-report delivery. Callers publish after their write has landed
/// and decide themselves whether a failure matters.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// In order, stopping at the first failure.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError>;
}
