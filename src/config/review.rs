//! Review behaviour: dashboard window and save policy tuning

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::application::SavePolicy;

/// Review behaviour configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewConfig {
    /// Weeks shown in the dashboard heatmap
    #[serde(default = "default_heatmap_weeks")]
    pub heatmap_weeks: u32,

    /// Per-attempt timeout for a persistence call
    #[serde(default = "default_save_timeout_ms")]
    pub save_timeout_ms: u64,

    /// Attempts per save, the first one included
    #[serde(default = "default_save_max_attempts")]
    pub save_max_attempts: u32,

    /// Delay before the first retry; doubles on each further retry
    #[serde(default = "default_save_backoff_ms")]
    pub save_backoff_ms: u64,

    /// Artificial delay of the memory backend
    #[serde(default = "default_stub_latency_ms")]
    pub stub_latency_ms: u64,
}

impl ReviewConfig {
    pub fn save_policy(&self) -> SavePolicy {
        SavePolicy {
            attempt_timeout: Duration::from_millis(self.save_timeout_ms),
            max_attempts: self.save_max_attempts,
            initial_backoff: Duration::from_millis(self.save_backoff_ms),
        }
    }

    pub fn stub_latency(&self) -> Duration {
        Duration::from_millis(self.stub_latency_ms)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check("heatmap_weeks", u64::from(self.heatmap_weeks), 1, 104)?;
        check("save_timeout_ms", self.save_timeout_ms, 100, 60_000)?;
        check("save_max_attempts", u64::from(self.save_max_attempts), 1, 10)?;
        check("save_backoff_ms", self.save_backoff_ms, 0, 10_000)?;
        check("stub_latency_ms", self.stub_latency_ms, 0, 10_000)?;
        Ok(())
    }
}

fn check(field: &'static str, value: u64, min: u64, max: u64) -> Result<(), ValidationError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange { field, min, max })
    }
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            heatmap_weeks: default_heatmap_weeks(),
            save_timeout_ms: default_save_timeout_ms(),
            save_max_attempts: default_save_max_attempts(),
            save_backoff_ms: default_save_backoff_ms(),
            stub_latency_ms: default_stub_latency_ms(),
        }
    }
}

fn default_heatmap_weeks() -> u32 {
    21
}

fn default_save_timeout_ms() -> u64 {
    5_000
}

fn default_save_max_attempts() -> u32 {
    3
}

fn default_save_backoff_ms() -> u64 {
    200
}

fn default_stub_latency_ms() -> u64 {
    300
}
