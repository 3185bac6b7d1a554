//! PostgreSQL adapters for the repository ports.
//!
//! Schema lives in `migrations/` at the crate root.

mod review_repository;
mod settings_repository;
mod streak_repository;

pub use review_repository::PostgresReviewRepository;
pub use settings_repository::PostgresSettingsRepository;
pub use streak_repository::PostgresStreakRepository;
