//! Foundation value objects shared by every domain module.

mod auth;
mod errors;
mod events;
mod ids;
mod review_status;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{DomainEvent, EventEnvelope, EventId};
pub use ids::{ReviewId, UserId};
pub use review_status::ReviewStatus;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
