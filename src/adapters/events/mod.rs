//! Event bus adapters.
//!
//! - `InMemoryEventBus` - in-process bus that records everything published

mod in_memory;

pub use in_memory::InMemoryEventBus;
