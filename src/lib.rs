//! ReviewRitual - guided weekly review.
//!
//! A five-step review wizard with per-step validation, weekly streaks and a
//! completion heatmap, history and insights, served over a JSON API behind a
//! session gate.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
