//! Simulated network behaviour shared by the in-memory stores.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::Duration;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Default round trip the in-memory stores pretend to take.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(300);

/// Latency and failure injection for an in-memory store.
///
/// Reads only pay the latency. Writes pay the latency and then consume one
/// injected failure, if any are queued.
#[derive(Debug)]
pub struct SimulatedNetwork {
    latency_ms: AtomicU64,
    pending_failures: AtomicU32,
    writes: AtomicU32,
}

impl SimulatedNetwork {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency_ms: AtomicU64::new(latency.as_millis() as u64),
            pending_failures: AtomicU32::new(0),
            writes: AtomicU32::new(0),
        }
    }

    /// No latency, no failures. What unit tests want.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn set_latency(&self, latency: Duration) {
        self.latency_ms
            .store(latency.as_millis() as u64, Ordering::SeqCst);
    }

    /// The next `count` writes fail with a transient database error.
    pub fn fail_next_writes(&self, count: u32) {
        self.pending_failures.store(count, Ordering::SeqCst);
    }

    /// Successful writes so far.
    pub fn write_count(&self) -> u32 {
        self.writes.load(Ordering::SeqCst)
    }

    pub(super) async fn read(&self) {
        self.wait().await;
    }

    pub(super) async fn write(&self, operation: &str) -> Result<(), DomainError> {
        self.wait().await;
        let injected = self
            .pending_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if injected {
            tracing::debug!(operation, "injected store failure");
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("Simulated failure during {}", operation),
            ));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn wait(&self) {
        let ms = self.latency_ms.load(Ordering::SeqCst);
        if ms > 0 {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }
}

impl Default for SimulatedNetwork {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY)
    }
}
