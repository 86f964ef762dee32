//! Crawler coordinator - breadth-first discovery
//!
//! This module contains the level-by-level crawl loop. The coordinator owns
//! the seen set and the frontier; fetch workers only ever hand back the
//! links they found, so no traversal state is shared between tasks.

use crate::config::RunConfig;
use crate::crawler::fetcher::{build_http_client, fetch_page_links};
use crate::crawler::pool::FetchPool;
use crate::url::normalize_url;
use crate::ChartError;
use reqwest::Client;
use std::collections::HashSet;
use tokio_util::sync::CancellationToken;

/// Main crawler structure
pub struct Crawler {
    client: Client,
    pool: FetchPool,
    max_depth: u32,
}

impl Crawler {
    /// Creates a new crawler
    ///
    /// # Arguments
    ///
    /// * `config` - The resolved run configuration
    /// * `cancel` - Stops the crawl when cancelled (interrupt or timeout)
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to crawl
    /// * `Err(ChartError)` - The HTTP client could not be built
    pub fn new(config: &RunConfig, cancel: CancellationToken) -> Result<Self, ChartError> {
        let client = build_http_client(&config.user_agent)?;
        let pool = FetchPool::new(config.concurrency, config.rate_limit, cancel);

        Ok(Self {
            client,
            pool,
            max_depth: config.max_depth,
        })
    }

    /// Crawls breadth-first from `seed` and returns every visited address
    ///
    /// Levels `0..=max_depth` are fetched one at a time; a level is fully
    /// drained before the next one starts. Pages whose fetch fails are still
    /// part of the result, they just contribute no links. Cancellation ends
    /// the crawl early with whatever has been visited so far.
    ///
    /// # Returns
    ///
    /// Normalized addresses, sorted lexicographically
    pub async fn crawl(&self, seed: &str) -> Vec<String> {
        let cancel = self.pool.cancellation();
        let mut seen: HashSet<String> = HashSet::new();
        let mut frontier: HashSet<String> = HashSet::from([normalize_url(seed)]);

        tracing::info!(
            "Starting crawl of {} (max depth {}, {} workers)",
            seed,
            self.max_depth,
            self.pool.concurrency()
        );

        for depth in 0..=self.max_depth {
            if cancel.is_cancelled() {
                tracing::info!("Crawl cancelled before depth {}", depth);
                break;
            }

            let level = std::mem::take(&mut frontier);
            if level.is_empty() {
                tracing::debug!("Frontier is empty at depth {}, crawl complete", depth);
                break;
            }

            let to_crawl: Vec<String> = level
                .into_iter()
                .filter(|url| seen.insert(url.clone()))
                .collect();

            if to_crawl.is_empty() {
                continue;
            }

            tracing::info!("Depth {}: fetching {} pages", depth, to_crawl.len());

            let client = self.client.clone();
            let mut results = self.pool.dispatch(to_crawl, move |url| {
                let client = client.clone();
                async move { fetch_page_links(&client, &url).await }
            });

            while let Some(links) = results.recv().await {
                for link in links {
                    let normalized = normalize_url(&link);
                    if !seen.contains(&normalized) {
                        frontier.insert(normalized);
                    }
                }
            }
        }

        let mut pages: Vec<String> = seen.into_iter().collect();
        pages.sort();

        tracing::info!("Crawl finished with {} pages", pages.len());
        pages
    }
}

/// Runs a complete crawl operation
///
/// # Example
///
/// ```no_run
/// use site_chart::config::RunConfig;
/// use site_chart::crawler::run_crawl;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = RunConfig::default();
/// let pages = run_crawl("https://example.com", &config, CancellationToken::new()).await?;
/// for page in pages {
///     println!("{}", page);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(
    seed: &str,
    config: &RunConfig,
    cancel: CancellationToken,
) -> Result<Vec<String>, ChartError> {
    let crawler = Crawler::new(config, cancel)?;
    Ok(crawler.crawl(seed).await)
}
