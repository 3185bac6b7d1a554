//! In-memory stores with a simulated network round trip.
//!
//! - `InMemoryReviewStore` - `ReviewRepository`
//! - `InMemoryStreakStore` - `StreakRepository`
//! - `InMemorySettingsStore` - `SettingsRepository`
//!
//! All three can share one `SimulatedNetwork` so a test can fail "the
//! backend" as a whole.

mod network;
mod review_store;
mod settings_store;
mod streak_store;

pub use network::{SimulatedNetwork, DEFAULT_LATENCY};
pub use review_store::InMemoryReviewStore;
pub use settings_store::InMemorySettingsStore;
pub use streak_store::InMemoryStreakStore;
