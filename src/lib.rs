//! Site Chart: a fast sitemap generator and link checker
//!
//! This crate crawls a website breadth-first from a seed URL, following
//! same-origin links up to a maximum depth, and can check an arbitrary list
//! of URLs for liveness. Both operations share one bounded, rate-limited,
//! cancellable fetch pool.

pub mod checker;
pub mod config;
pub mod crawler;
pub mod output;
pub mod shutdown;
pub mod url;

use thiserror::Error;

/// Main error type for Site Chart operations
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("No URLs provided via arguments or stdin")]
    NoInput,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid duration '{0}' (expected e.g. 30s, 1m30s, 500ms)")]
    InvalidDuration(String),
}

/// Result type alias for Site Chart operations
pub type Result<T> = std::result::Result<T, ChartError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use checker::{CheckResult, Checker, LinkStatus, LivenessReport};
pub use config::RunConfig;
pub use crawler::Crawler;
pub use crate::url::normalize_url;
