//! Provider request pacing for the sequential scheduling mode.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter};

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Enforces a fixed inter-request interval against the upstream provider.
///
/// The analyzer sleeps between sequential tickers anyway; the pacer is the
/// backstop that holds the rate even when a caller drives `analyze_one`
/// directly in a loop.
#[derive(Clone)]
pub struct RequestPacer {
    limiter: Arc<DirectRateLimiter>,
    interval: Duration,
}

impl RequestPacer {
    pub fn new(interval: Duration) -> Self {
        let period = interval.max(Duration::from_millis(1));
        let quota = Quota::with_period(period)
            .expect("pacing period is always greater than zero")
            .allow_burst(NonZeroU32::MIN);
        Self {
            limiter: Arc::new(RateLimiter::direct(quota)),
            interval,
        }
    }

    /// Tries to take rate budget; on exhaustion returns the interval the
    /// caller should wait before retrying.
    pub fn acquire(&self) -> Result<(), Duration> {
        if self.limiter.check().is_ok() {
            return Ok(());
        }
        Err(self.interval)
    }

    /// Waits until budget is available.
    pub async fn pace(&self) {
        while let Err(delay) = self.acquire() {
            tokio::time::sleep(delay).await;
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}
