use url::Url;

/// Normalizes a URL into the key used for deduplication
///
/// # Normalization Steps
///
/// 1. Parse the URL; if it does not parse as an absolute URL, return the
///    input unchanged
/// 2. Remove fragment (everything after #)
/// 3. Serialize and remove trailing slashes
///
/// Parsing lowercases the host of `http`/`https` URLs. Path and query are
/// left exactly as the parser serializes them.
///
/// # Arguments
///
/// * `raw` - The URL string to normalize
///
/// # Returns
///
/// The normalized URL string. This function never fails.
///
/// # Examples
///
/// ```
/// use site_chart::url::normalize_url;
///
/// assert_eq!(normalize_url("https://example.com/"), "https://example.com");
/// assert_eq!(normalize_url("https://example.com/page#frag"), "https://example.com/page");
/// assert_eq!(normalize_url(""), "");
/// ```
pub fn normalize_url(raw: &str) -> String {
    let mut url = match Url::parse(raw) {
        Ok(url) => url,
        Err(_) => return raw.to_string(),
    };

    url.set_fragment(None);

    // Stripping every trailing slash (not just one) keeps this idempotent
    // for inputs like `https://a.com/x//`.
    url.as_str().trim_end_matches('/').to_string()
}
