//! Domain layer: pure business types and rules, no I/O.
//!
//! - `foundation` - shared value objects, errors, events
//! - `calendar` - Sunday-anchored week arithmetic
//! - `review` - review steps, payloads, validator, aggregate, history
//! - `wizard` - wizard reducer and session timer
//! - `streak` - streak record, stats, heatmap, milestones
//! - `insights` - monthly, quarterly and yearly aggregation
//! - `reminder` - schedule settings and reminder planning

pub mod calendar;
pub mod foundation;
pub mod insights;
pub mod reminder;
pub mod review;
pub mod streak;
pub mod wizard;
