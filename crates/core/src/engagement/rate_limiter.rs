//! Minimum-interval rate limiter for outbound engagement API calls.

use tokio::sync::Mutex;
use tokio::time::{sleep, Duration, Instant};

/// Serializes outbound calls so that consecutive grants are spaced at least
/// `min_interval` apart, measured from the start of the previous grant.
///
/// One instance is shared by every concurrent fetch in the process. The
/// last-grant timestamp is the only cross-task mutable state in the pipeline
/// and is only ever touched inside `acquire()`'s single critical section.
/// Waiters resume in FIFO order (tokio mutex queueing).
pub struct RateLimiter {
    min_interval: Duration,
    last_grant: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Create a limiter with the given minimum spacing between calls.
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_grant: Mutex::new(None),
        }
    }

    /// Suspend until at least `min_interval` has elapsed since the previous
    /// grant, then record the new grant time and return.
    ///
    /// The lock is held across the sleep so two tasks can never compute
    /// overlapping slots from the same timestamp.
    pub async fn acquire(&self) {
        let mut last = self.last_grant.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_interval {
                sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}
