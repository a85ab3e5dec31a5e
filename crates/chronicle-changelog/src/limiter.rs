//! Concurrency limit for tag lookups

use std::future::Future;

use tokio::sync::Semaphore;
use tracing::trace;

/// Default number of lookups allowed to run at once
pub const DEFAULT_LIMIT: usize = 5;

/// Bounds how many tag lookups run at the same time.
///
/// Waiting lookups start in the order they asked for a slot. The slot is
/// held by a permit that is dropped when the lookup finishes, so it is
/// returned whether the lookup succeeded, failed or was cancelled.
#[derive(Debug)]
pub struct QueryLimiter {
    semaphore: Semaphore,
    limit: usize,
}

impl QueryLimiter {
    /// Create a limiter allowing `limit` concurrent lookups (at least one)
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            semaphore: Semaphore::new(limit),
            limit,
        }
    }

    /// Maximum number of concurrent lookups
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of lookups currently holding a slot
    pub fn in_flight(&self) -> usize {
        self.limit - self.semaphore.available_permits()
    }

    /// Run `work` once a slot is free and return its output
    pub async fn run<F, Fut, T>(&self, work: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        // The semaphore is never closed, so acquiring only waits
        let _permit = self.semaphore.acquire().await.ok();
        trace!(in_flight = self.in_flight(), "lookup started");
        work().await
    }
}

impl Default for QueryLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}
