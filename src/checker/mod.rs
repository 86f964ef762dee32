//! Liveness checking for an explicit list of URLs
//!
//! Every address is probed once with a HEAD request through the same kind
//! of bounded, rate-limited pool the crawler uses. Addresses are checked
//! exactly as given: no normalization and no deduplication.

use crate::config::RunConfig;
use crate::crawler::{build_http_client, head_url, FetchPool, FetchResult};
use crate::ChartError;
use reqwest::Client;
use std::fmt;
use tokio_util::sync::CancellationToken;

/// Liveness classification of a probed URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkStatus {
    /// The server answered with a 2xx status
    Live,
    /// Any other status, or no response at all
    Dead,
}

impl LinkStatus {
    /// Returns the lowercase label used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Dead => "dead",
        }
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of probing a single URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    /// The URL exactly as it was supplied
    pub url: String,

    /// Live or dead
    pub status: LinkStatus,

    /// HTTP status code, 0 if no response was received
    pub code: u16,
}

impl CheckResult {
    /// Classifies a HEAD response for `url`
    pub fn from_fetch(url: String, result: &FetchResult) -> Self {
        let status = match result {
            FetchResult::Success { .. } => LinkStatus::Live,
            FetchResult::HttpError { .. } | FetchResult::NetworkError { .. } => LinkStatus::Dead,
        };

        Self {
            url,
            status,
            code: result.status_code(),
        }
    }

    /// Returns true if the link is live
    pub fn is_live(&self) -> bool {
        self.status == LinkStatus::Live
    }
}

/// Live and dead results, each sorted by URL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LivenessReport {
    pub live: Vec<CheckResult>,
    pub dead: Vec<CheckResult>,
}

impl LivenessReport {
    /// Partitions results into live and dead groups and sorts each by URL
    pub fn from_results(results: Vec<CheckResult>) -> Self {
        let (mut live, mut dead): (Vec<_>, Vec<_>) =
            results.into_iter().partition(CheckResult::is_live);

        live.sort_by(|a, b| a.url.cmp(&b.url));
        dead.sort_by(|a, b| a.url.cmp(&b.url));

        Self { live, dead }
    }

    /// Total number of results in the report
    pub fn len(&self) -> usize {
        self.live.len() + self.dead.len()
    }

    /// Returns true if no URL was checked
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Probes a single URL with a HEAD request
pub async fn check_url(client: &Client, url: String) -> CheckResult {
    let result = head_url(client, &url).await;

    if let FetchResult::NetworkError { error } = &result {
        tracing::debug!("{} is unreachable: {}", url, error);
    }

    CheckResult::from_fetch(url, &result)
}

/// Liveness checker bound to one client and one pool
pub struct Checker {
    client: Client,
    pool: FetchPool,
}

impl Checker {
    /// Creates a new checker
    ///
    /// # Returns
    ///
    /// * `Ok(Checker)` - Ready to check
    /// * `Err(ChartError)` - The HTTP client could not be built
    pub fn new(config: &RunConfig, cancel: CancellationToken) -> Result<Self, ChartError> {
        let client = build_http_client(&config.user_agent)?;
        let pool = FetchPool::new(config.concurrency, config.rate_limit, cancel);

        Ok(Self { client, pool })
    }

    /// Checks every URL and returns the partitioned report
    ///
    /// If the run is cancelled, URLs that were not probed yet are missing
    /// from the report.
    pub async fn check(&self, urls: Vec<String>) -> LivenessReport {
        tracing::info!(
            "Checking {} URLs with {} workers",
            urls.len(),
            self.pool.concurrency()
        );

        let client = self.client.clone();
        let results = self
            .pool
            .run(urls, move |url| {
                let client = client.clone();
                async move { check_url(&client, url).await }
            })
            .await;

        let report = LivenessReport::from_results(results);
        tracing::info!(
            "Check finished: {} live, {} dead",
            report.live.len(),
            report.dead.len()
        );
        report
    }
}
