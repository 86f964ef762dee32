use url::{Origin, Url};

/// Returns the serialized origin (scheme, host and non-default port) of a URL
///
/// Discovery scopes links by the origin that actually served a page, which
/// after redirects may differ from the origin that was requested.
///
/// # Returns
///
/// * `Some(String)` - e.g. `https://example.com` or `http://127.0.0.1:8080`
/// * `None` - The URL has an opaque origin (`data:`, `file:`, ...)
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_chart::url::effective_origin;
///
/// let url = Url::parse("https://EXAMPLE.com/path?q=1").unwrap();
/// assert_eq!(effective_origin(&url), Some("https://example.com".to_string()));
/// ```
pub fn effective_origin(url: &Url) -> Option<String> {
    match url.origin() {
        origin @ Origin::Tuple(..) => Some(origin.ascii_serialization()),
        Origin::Opaque(_) => None,
    }
}

/// Checks whether `link` lives under the same origin as `base`
///
/// Unparseable links and links with opaque origins are never same-origin.
pub fn same_origin(link: &str, base: &Url) -> bool {
    let Ok(parsed) = Url::parse(link) else {
        return false;
    };

    match (parsed.origin(), base.origin()) {
        (a @ Origin::Tuple(..), b @ Origin::Tuple(..)) => a == b,
        _ => false,
    }
}
