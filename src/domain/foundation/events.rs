//! Envelope for integration events leaving the domain.

use std::fmt;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use super::Timestamp;

/// An event that can be wrapped in an [`EventEnvelope`].
pub trait DomainEvent: Serialize + Send + Sync {
    /// Dotted routing key ending in a version, e.g. `"review.completed.v1"`.
    const EVENT_TYPE: &'static str;

    fn aggregate_id(&self) -> String;

    fn occurred_at(&self) -> Timestamp;
}

/// Identifies one published event; consumers dedupe on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub event_id: EventId,
    pub event_type: String,
    pub schema_version: u32,
    pub aggregate_id: String,
    pub occurred_at: Timestamp,
    /// Acting user, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub payload: JsonValue,
}

impl EventEnvelope {
    /// A payload that fails to serialize is sent as `null`; the routing
    /// fields still go out.
    pub fn wrap<E: DomainEvent>(event: &E) -> Self {
        Self {
            event_id: EventId::new(),
            event_type: E::EVENT_TYPE.to_string(),
            schema_version: schema_version(E::EVENT_TYPE),
            aggregate_id: event.aggregate_id(),
            occurred_at: event.occurred_at(),
            user_id: None,
            payload: serde_json::to_value(event).unwrap_or(JsonValue::Null),
        }
    }

    pub fn for_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn payload_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.payload.clone())
    }
}

/// `"x.y.v2"` is version 2. Unversioned keys are version 1.
fn schema_version(event_type: &str) -> u32 {
    event_type
        .rsplit_once(".v")
        .and_then(|(_, version)| version.parse().ok())
        .unwrap_or(1)
}
