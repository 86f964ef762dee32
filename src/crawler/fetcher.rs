//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests, including:
//! - Building HTTP clients with the configured user agent
//! - GET requests for page discovery
//! - HEAD requests for liveness probing
//! - Error classification
//!
//! Every function here reduces its outcome to a value. Nothing in this
//! module returns an error to the worker pool.

use crate::crawler::parser::{extract_links, resolve_link};
use crate::url::{effective_origin, normalize_url, same_origin};
use reqwest::{Client, Method};
use std::time::Duration;
use url::Url;

/// Result of a single HTTP request
#[derive(Debug)]
pub enum FetchResult {
    /// The server answered with a 2xx status
    Success {
        /// Final URL after redirects
        final_url: Url,
        /// HTTP status code
        status_code: u16,
        /// Page body content (empty for HEAD requests)
        body: String,
    },

    /// The server answered with a non-2xx status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// No usable response: malformed URL, DNS failure, connection refused,
    /// timeout, or an unreadable body
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Returns the status code, or 0 when no response was received
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Success { status_code, .. } | Self::HttpError { status_code } => *status_code,
            Self::NetworkError { .. } => 0,
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are followed (up to reqwest's default of 10 hops) so that the
/// final response URL reflects the origin that actually served the page.
///
/// # Arguments
///
/// * `user_agent` - Value of the `User-Agent` header sent with every request
///
/// # Example
///
/// ```no_run
/// use site_chart::crawler::build_http_client;
///
/// let client = build_http_client("SiteChart-Sitemapper/1.0").unwrap();
/// ```
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Sends a GET request and reads the body
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    send(client, Method::GET, url).await
}

/// Sends a HEAD request; the body of a successful result is always empty
pub async fn head_url(client: &Client, url: &str) -> FetchResult {
    send(client, Method::HEAD, url).await
}

async fn send(client: &Client, method: Method, url: &str) -> FetchResult {
    let read_body = method == Method::GET;

    let response = match client.request(method, url).send().await {
        Ok(response) => response,
        Err(e) => return classify_error(e),
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().clone();
    let body = if read_body {
        match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return FetchResult::NetworkError {
                    error: e.to_string(),
                }
            }
        }
    } else {
        String::new()
    };

    FetchResult::Success {
        final_url,
        status_code: status.as_u16(),
        body,
    }
}

fn classify_error(e: reqwest::Error) -> FetchResult {
    let error = if e.is_builder() {
        format!("Malformed request: {}", e)
    } else if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        "Connection failed".to_string()
    } else {
        e.to_string()
    };

    FetchResult::NetworkError { error }
}

/// Fetches one page and returns its same-origin links
///
/// This is the discovery unit of work. It issues a GET, extracts anchors
/// from the body, resolves them against the final response URL and keeps
/// only those whose normalized form shares the response's origin. Any
/// failure yields an empty list.
pub async fn fetch_page_links(client: &Client, url: &str) -> Vec<String> {
    match fetch_url(client, url).await {
        FetchResult::Success {
            final_url, body, ..
        } => {
            tracing::debug!(
                "Fetched {} (served by {})",
                url,
                effective_origin(&final_url).unwrap_or_default()
            );
            in_origin_links(&body, &final_url)
        }
        FetchResult::HttpError { status_code } => {
            tracing::debug!("HTTP {} for {}, no links followed", status_code, url);
            Vec::new()
        }
        FetchResult::NetworkError { error } => {
            tracing::warn!("Failed to fetch {}: {}", url, error);
            Vec::new()
        }
    }
}

/// Extracts links from `body` that live under the origin of `final_url`
pub fn in_origin_links(body: &str, final_url: &Url) -> Vec<String> {
    extract_links(body)
        .iter()
        .filter_map(|link| resolve_link(&link.href, final_url))
        .filter(|link| same_origin(&normalize_url(link), final_url))
        .collect()
}
