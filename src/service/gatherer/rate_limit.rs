//! Token bucket rate limiting for gather workers

use std::time::Duration;
use tokio::time::Instant;

/// Simple token bucket. Every gather worker owns one privately, so
/// acquiring never contends with another worker.
pub(super) struct TokenBucket {
    /// Requests per minute
    rpm: u32,
    /// Token bucket
    tokens: f64,
    /// Last refill time
    last_refill: Instant,
}

impl TokenBucket {
    pub(super) fn new(rpm: u32) -> Self {
        let rpm = rpm.max(1);
        Self {
            rpm,
            tokens: rpm as f64,
            last_refill: Instant::now(),
        }
    }

    /// Take one token, sleeping until the bucket has refilled enough
    pub(super) async fn acquire(&mut self) {
        loop {
            self.refill();

            if self.tokens >= 1.0 {
                self.tokens -= 1.0;
                return;
            }

            let deficit = 1.0 - self.tokens;
            let wait = deficit / (self.rpm as f64 / 60.0);
            tokio::time::sleep(Duration::from_secs_f64(wait)).await;
        }
    }

    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        let refill = elapsed * (self.rpm as f64 / 60.0);
        self.tokens = (self.tokens + refill).min(self.rpm as f64);
        self.last_refill = now;
    }
}
