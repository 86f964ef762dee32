//! HTML link extraction
//!
//! This module handles parsing HTML content to extract anchor targets and
//! resolving them against the URL that served the page.

use scraper::{Html, Selector};
use url::Url;

/// An anchor found in an HTML document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// The raw `href` attribute, exactly as written in the markup
    pub href: String,

    /// The anchor text with whitespace collapsed
    pub text: String,
}

/// Extracts every `<a href="...">` from an HTML document, in document order
///
/// Parsing is lenient: malformed markup yields whatever anchors the HTML5
/// parser recovers, never an error.
///
/// # Example
///
/// ```
/// use site_chart::crawler::extract_links;
///
/// let html = r#"<html><body><a href="/page2">Second   page</a></body></html>"#;
/// let links = extract_links(html);
/// assert_eq!(links[0].href, "/page2");
/// assert_eq!(links[0].text, "Second page");
/// ```
pub fn extract_links(html: &str) -> Vec<Link> {
    let document = Html::parse_document(html);

    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| {
            let href = element.value().attr("href")?;
            let text = element
                .text()
                .flat_map(str::split_whitespace)
                .collect::<Vec<_>>()
                .join(" ");

            Some(Link {
                href: href.to_string(),
                text,
            })
        })
        .collect()
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - empty or fragment-only hrefs (same page anchors)
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
pub fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
        || lower.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
