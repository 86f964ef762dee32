//! Shared request throttle
//!
//! A single limiter hands out one token per interval to whichever worker
//! asks first. Waiting for a token races against the run's cancellation
//! token so that a cancelled worker never blocks until the next tick.

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Upper bound on requests per second accepted by [`Throttle::per_second`]
pub const MAX_RATE_LIMIT: f64 = 100.0;

/// Longest spacing between tokens; slower rates are raised to one per hour
pub const MAX_INTERVAL: Duration = Duration::from_secs(3600);

/// Rate limiter shared by every worker of one operation
pub struct Throttle {
    limiter: DirectLimiter,
    interval: Duration,
}

impl Throttle {
    /// Creates a throttle issuing `rate` tokens per second
    ///
    /// # Returns
    ///
    /// * `Some(Throttle)` - For any finite rate greater than zero
    /// * `None` - When `rate` is zero, negative or not finite (unlimited)
    ///
    /// The interval is bounded by [`MAX_INTERVAL`].
    pub fn per_second(rate: f64) -> Option<Self> {
        if !rate.is_finite() || rate <= 0.0 {
            return None;
        }

        let interval = Duration::try_from_secs_f64(1.0 / rate.min(MAX_RATE_LIMIT))
            .map_or(MAX_INTERVAL, |interval| interval.min(MAX_INTERVAL));
        let quota = Quota::with_period(interval)?;

        Some(Self {
            limiter: RateLimiter::direct(quota),
            interval,
        })
    }

    /// Waits for the next token
    ///
    /// # Returns
    ///
    /// * `true` - A token was consumed; the caller may issue its request
    /// * `false` - The run was cancelled first; the caller must abandon
    pub async fn acquire(&self, cancel: &CancellationToken) -> bool {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => false,
            _ = self.limiter.until_ready() => true,
        }
    }

    /// Returns the spacing between tokens
    pub fn interval(&self) -> Duration {
        self.interval
    }
}
