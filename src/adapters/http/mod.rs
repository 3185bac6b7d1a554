//! HTTP adapters - REST API over axum.
//!
//! Each area has its own adapter (dto, handlers, routes). `router` wires
//! them behind the auth middleware and the route guard.

pub mod dashboard;
pub mod error;
pub mod history;
pub mod insights;
pub mod middleware;
pub mod review;
pub mod router;
pub mod settings;

pub use error::{ApiError, ErrorResponse};
pub use router::{app_router, ApiHandlers, Ports};
