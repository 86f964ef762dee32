use crate::output::OutputFormat;
use serde::Deserialize;
use std::time::Duration;

/// Default `User-Agent` header value
pub const DEFAULT_USER_AGENT: &str = "SiteChart-Sitemapper/1.0";

/// Default maximum crawl depth
pub const DEFAULT_DEPTH: u32 = 3;

/// Default number of concurrent requests
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Default requests per second
pub const DEFAULT_RATE_LIMIT: f64 = 2.0;

/// One layer of user-supplied settings
///
/// The config file, the environment and the command line each produce a
/// `Settings`; unset fields fall through to the layer below. Keys in the
/// TOML file are kebab-case, e.g. `rate-limit = 5`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    /// Maximum depth to traverse (`build` only)
    pub depth: Option<u32>,

    /// Output format for `build`: `xml` or `txt`
    pub format: Option<String>,

    /// Number of concurrent requests; clamped to 1..=100
    pub concurrency: Option<i64>,

    /// Requests per second, 0 for unlimited; clamped to 0..=100
    pub rate_limit: Option<f64>,

    /// Custom `User-Agent` header
    pub user_agent: Option<String>,

    /// Overall deadline such as `30s` or `1m30s`; `0` disables it
    pub timeout: Option<String>,
}

impl Settings {
    /// Overlays `higher` on top of `self`; fields set in `higher` win
    pub fn merge(self, higher: Settings) -> Settings {
        Settings {
            depth: higher.depth.or(self.depth),
            format: higher.format.or(self.format),
            concurrency: higher.concurrency.or(self.concurrency),
            rate_limit: higher.rate_limit.or(self.rate_limit),
            user_agent: higher.user_agent.or(self.user_agent),
            timeout: higher.timeout.or(self.timeout),
        }
    }
}

/// Immutable configuration for one invocation
///
/// Built by [`RunConfig::resolve`]; by then every value is validated and
/// clamped, so the crawler and checker never see out-of-range input.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Maximum depth to crawl from the seed URL
    pub max_depth: u32,

    /// Output format for sitemaps
    pub format: OutputFormat,

    /// Maximum number of in-flight requests
    pub concurrency: usize,

    /// Requests per second, 0 for unlimited
    pub rate_limit: f64,

    /// Value of the `User-Agent` header
    pub user_agent: String,

    /// Cancel the run after this long
    pub timeout: Option<Duration>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_DEPTH,
            format: OutputFormat::Xml,
            concurrency: DEFAULT_CONCURRENCY,
            rate_limit: DEFAULT_RATE_LIMIT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }
}
