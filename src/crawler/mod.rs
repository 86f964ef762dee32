//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with outcome classification
//! - HTML parsing and link extraction
//! - The bounded, rate-limited fetch pool
//! - Breadth-first crawl coordination

mod coordinator;
mod fetcher;
mod parser;
mod pool;
mod throttle;

pub use coordinator::{run_crawl, Crawler};
pub use fetcher::{
    build_http_client, fetch_page_links, fetch_url, head_url, in_origin_links, FetchResult,
};
pub use parser::{extract_links, resolve_link, Link};
pub use pool::{FetchPool, MAX_CONCURRENCY};
pub use throttle::{Throttle, MAX_INTERVAL, MAX_RATE_LIMIT};
