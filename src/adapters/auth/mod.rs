//! Authentication adapters implementing `SessionValidator`.
//!
//! - `mock` - fixed token table for tests and the memory backend
//! - `jwt` - HS256 tokens signed with the configured secret

mod jwt;
mod mock;

pub use jwt::{JwtSessionValidator, SessionClaims};
pub use mock::MockSessionValidator;
