//! Adapters - Implementations of port interfaces.
//!
//! - `auth` - session validators (HS256 JWT, mock)
//! - `events` - in-process event bus
//! - `http` - axum REST API, auth middleware and route guard
//! - `memory` - in-memory stores behind a simulated network
//! - `postgres` - sqlx repositories

pub mod auth;
pub mod events;
pub mod http;
pub mod memory;
pub mod postgres;

pub use events::InMemoryEventBus;
