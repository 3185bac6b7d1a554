//! Shared wiring for handler tests: instant in-memory stores and a bus.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};

use crate::adapters::events::InMemoryEventBus;
use crate::adapters::memory::{
    InMemoryReviewStore, InMemorySettingsStore, InMemoryStreakStore, SimulatedNetwork,
};
use crate::application::SavePolicy;
use crate::domain::calendar::week_info;
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::review::{Review, ReviewStep};
use crate::domain::review::fixtures::valid_payload;

pub struct Harness {
    pub network: Arc<SimulatedNetwork>,
    pub reviews: Arc<InMemoryReviewStore>,
    pub streaks: Arc<InMemoryStreakStore>,
    pub settings: Arc<InMemorySettingsStore>,
    pub bus: Arc<InMemoryEventBus>,
    pub policy: SavePolicy,
}

impl Harness {
    pub fn new() -> Self {
        let network = Arc::new(SimulatedNetwork::instant());
        Self {
            reviews: Arc::new(InMemoryReviewStore::new(network.clone())),
            streaks: Arc::new(InMemoryStreakStore::new(network.clone())),
            settings: Arc::new(InMemorySettingsStore::new(network.clone())),
            bus: Arc::new(InMemoryEventBus::new()),
            policy: SavePolicy::single_attempt(),
            network,
        }
    }
}

pub fn user() -> UserId {
    UserId::new("user-1").unwrap()
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Noon UTC on `day`.
pub fn at(day: &str) -> Timestamp {
    Timestamp::from_datetime(date(day).and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap()).and_utc())
}

/// A review for the week containing `day`, completed through `steps` saves.
pub fn review_through(day: &str, steps: usize) -> Review {
    let mut review = Review::new(user(), week_info(date(day)));
    review.begin(at(day)).unwrap();
    for step in ReviewStep::ALL.into_iter().take(steps) {
        review.apply_saved_step(valid_payload(step)).unwrap();
    }
    review.take_events();
    review
}

pub fn completed_review(day: &str) -> Review {
    let mut review = review_through(day, 5);
    review.complete(at(day), 1500).unwrap();
    review.take_events();
    review
}
