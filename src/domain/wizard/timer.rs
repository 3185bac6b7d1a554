//! Elapsed-session timer for the wizard.

use tokio::time::{Duration, Instant};

use crate::domain::calendar::format_time_elapsed;

/// Counts whole seconds since the wizard was opened.
///
/// Purely informational: it never gates a transition and keeps running
/// through validation failures and saves.
#[derive(Debug, Clone, Copy)]
pub struct SessionTimer {
    opened_at: Instant,
    /// Time already spent in earlier sessions of the same review.
    carried: Duration,
}

impl SessionTimer {
    pub fn start() -> Self {
        Self::resume(0)
    }

    /// Starts a timer that continues from previously recorded seconds.
    pub fn resume(carried_seconds: u64) -> Self {
        Self {
            opened_at: Instant::now(),
            carried: Duration::from_secs(carried_seconds),
        }
    }

    pub fn elapsed_seconds(&self) -> u64 {
        (self.carried + self.opened_at.elapsed()).as_secs()
    }

    /// `mm:ss` for the wizard header.
    pub fn display(&self) -> String {
        format_time_elapsed(self.elapsed_seconds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_second() {
        let timer = SessionTimer::start();
        assert_eq!(timer.elapsed_seconds(), 0);

        tokio::time::advance(Duration::from_millis(999)).await;
        assert_eq!(timer.elapsed_seconds(), 0);

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(timer.elapsed_seconds(), 1);

        tokio::time::advance(Duration::from_secs(64)).await;
        assert_eq!(timer.display(), "01:05");
    }

    #[tokio::test(start_paused = true)]
    async fn resume_adds_previous_sessions() {
        let timer = SessionTimer::resume(600);
        tokio::time::advance(Duration::from_secs(30)).await;
        assert_eq!(timer.elapsed_seconds(), 630);
    }
}
