//! HTTP middleware for axum.
//!
//! - `auth` - session resolution and the `RequireAuth` extractor
//! - `route_guard` - public allow-list and login redirects

pub mod auth;
pub mod route_guard;

pub use auth::{auth_middleware, AuthRejection, AuthState, RequireAuth, SESSION_COOKIE};
pub use route_guard::{route_guard, GuardState};
