//! Bounded, rate-limited, cancellable fetch pool
//!
//! The pool fans one unit of work per address out onto tokio tasks while
//! enforcing three independent limits:
//! - a counting semaphore caps the number of in-flight units
//! - an optional [`Throttle`] spaces out network calls
//! - a [`CancellationToken`] stops admission and aborts in-flight units
//!
//! Results come back over a channel that closes once every admitted unit
//! has either reported or been abandoned.

use crate::crawler::throttle::Throttle;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Upper bound on concurrent units accepted by [`FetchPool::new`]
pub const MAX_CONCURRENCY: usize = 100;

/// Worker pool shared by one crawl or one liveness check
pub struct FetchPool {
    gate: Arc<Semaphore>,
    throttle: Option<Arc<Throttle>>,
    cancel: CancellationToken,
    concurrency: usize,
}

impl FetchPool {
    /// Creates a new pool
    ///
    /// # Arguments
    ///
    /// * `concurrency` - Maximum in-flight units, clamped to `1..=100`
    /// * `rate_limit` - Requests per second, `0` for unlimited
    /// * `cancel` - Cancellation signal for the whole operation
    pub fn new(concurrency: usize, rate_limit: f64, cancel: CancellationToken) -> Self {
        let concurrency = concurrency.clamp(1, MAX_CONCURRENCY);
        let throttle = Throttle::per_second(rate_limit).map(Arc::new);

        match &throttle {
            Some(throttle) => tracing::debug!(
                "Fetch pool: {} workers, one request every {:?}",
                concurrency,
                throttle.interval()
            ),
            None => tracing::debug!("Fetch pool: {} workers, no rate limit", concurrency),
        }

        Self {
            gate: Arc::new(Semaphore::new(concurrency)),
            throttle,
            cancel,
            concurrency,
        }
    }

    /// Returns the concurrency ceiling
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Returns the cancellation token observed by this pool
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Dispatches one unit of work per item and returns the results channel
    ///
    /// A background dispatcher acquires a semaphore permit for each item
    /// before spawning its unit, so at most `concurrency` units ever run at
    /// once. Each unit waits for a throttle token, then runs `work`. A unit
    /// cancelled before or during `work` reports nothing. The returned
    /// receiver yields `None` once every unit has finished.
    ///
    /// `work` must reduce every outcome to a `T`; a panicking unit is
    /// contained in its task and logged.
    pub fn dispatch<T, F, Fut>(&self, items: Vec<String>, work: F) -> mpsc::UnboundedReceiver<T>
    where
        T: Send + 'static,
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let gate = Arc::clone(&self.gate);
        let throttle = self.throttle.clone();
        let cancel = self.cancel.clone();
        let work = Arc::new(work);

        tokio::spawn(async move {
            let mut workers = JoinSet::new();

            for item in items {
                let permit = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        tracing::debug!("Cancelled, refusing further admissions");
                        break;
                    }
                    permit = Arc::clone(&gate).acquire_owned() => match permit {
                        Ok(permit) => permit,
                        Err(_) => break,
                    },
                };

                let tx = tx.clone();
                let throttle = throttle.clone();
                let cancel = cancel.clone();
                let work = Arc::clone(&work);

                workers.spawn(async move {
                    // Released when this task ends, including on panic
                    let _permit = permit;

                    if let Some(throttle) = throttle {
                        if !throttle.acquire(&cancel).await {
                            tracing::trace!("Abandoned {} while waiting for rate token", item);
                            return;
                        }
                    }

                    let label = item.clone();
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => {
                            tracing::trace!("Aborted in-flight request for {}", label);
                        }
                        outcome = (*work)(item) => {
                            let _ = tx.send(outcome);
                        }
                    }
                });
            }

            drop(tx);

            while let Some(joined) = workers.join_next().await {
                if let Err(e) = joined {
                    if e.is_panic() {
                        tracing::error!("Fetch worker panicked: {}", e);
                    }
                }
            }
        });

        rx
    }

    /// Dispatches the items and waits for every unit to finish
    ///
    /// Results are returned in completion order.
    pub async fn run<T, F, Fut>(&self, items: Vec<String>, work: F) -> Vec<T>
    where
        T: Send + 'static,
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        let mut rx = self.dispatch(items, work);
        let mut results = Vec::new();

        while let Some(result) = rx.recv().await {
            results.push(result);
        }

        results
    }
}
