//! Integration events published for review lifecycle changes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainEvent, EventEnvelope, ReviewId, Timestamp, UserId};
use crate::domain::review::{ReviewEvent, ReviewStep};
use crate::ports::EventPublisher;

macro_rules! review_event {
    ($name:ident, $event_type:literal, $occurred_at:ident) => {
        impl DomainEvent for $name {
            const EVENT_TYPE: &'static str = $event_type;

            fn aggregate_id(&self) -> String {
                self.review_id.to_string()
            }

            fn occurred_at(&self) -> Timestamp {
                self.$occurred_at
            }
        }
    };
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewStartedEvent {
    pub review_id: ReviewId,
    pub started_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewStepSavedEvent {
    pub review_id: ReviewId,
    pub step: ReviewStep,
    pub saved_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewCompletedEvent {
    pub review_id: ReviewId,
    pub week_start: NaiveDate,
    pub completed_at: Timestamp,
    pub time_spent_seconds: u64,
}

review_event!(ReviewStartedEvent, "review.started.v1", started_at);
review_event!(ReviewStepSavedEvent, "review.step_saved.v1", saved_at);
review_event!(ReviewCompletedEvent, "review.completed.v1", completed_at);

/// Wraps aggregate events in envelopes tagged with the acting user.
pub fn envelopes_for(events: Vec<ReviewEvent>, user_id: &UserId) -> Vec<EventEnvelope> {
    let now = Timestamp::now();
    events
        .into_iter()
        .map(|event| match event {
            ReviewEvent::Started {
                review_id,
                started_at,
            } => EventEnvelope::wrap(&ReviewStartedEvent {
                review_id,
                started_at,
            }),
            ReviewEvent::StepSaved { review_id, step } => {
                EventEnvelope::wrap(&ReviewStepSavedEvent {
                    review_id,
                    step,
                    saved_at: now,
                })
            }
            ReviewEvent::Completed {
                review_id,
                week_start,
                completed_at,
                time_spent_seconds,
            } => EventEnvelope::wrap(&ReviewCompletedEvent {
                review_id,
                week_start,
                completed_at,
                time_spent_seconds,
            }),
        })
        .map(|envelope| envelope.for_user(user_id.as_str()))
        .collect()
}

/// Publishes after the write already succeeded, so a failing bus is logged
/// and swallowed.
pub async fn publish_review_events(
    publisher: &dyn EventPublisher,
    events: Vec<ReviewEvent>,
    user_id: &UserId,
) {
    if events.is_empty() {
        return;
    }
    if let Err(error) = publisher.publish_all(envelopes_for(events, user_id)).await {
        tracing::warn!(user_id = %user_id, error = %error, "failed to publish review events");
    }
}
