//! Ports: the interfaces the application layer depends on.
//!
//! Adapters in `crate::adapters` implement these; handlers take them as
//! `Arc<dyn Trait>` so storage and auth can be swapped without touching
//! review or streak logic.

mod event_publisher;
mod review_repository;
mod session_validator;
mod settings_repository;
mod streak_repository;

pub use event_publisher::EventPublisher;
pub use review_repository::ReviewRepository;
pub use session_validator::SessionValidator;
pub use settings_repository::SettingsRepository;
pub use streak_repository::StreakRepository;
