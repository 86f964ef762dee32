//! Configuration module for Site Chart
//!
//! Settings come from three layers, highest precedence first:
//! 1. Command-line flags
//! 2. `CHART_*` environment variables
//! 3. A TOML config file (`--config <path>` or `$HOME/.chart.toml`)
//!
//! The merged [`Settings`] are resolved into an immutable [`RunConfig`],
//! with concurrency and rate limit clamped to their allowed ranges.
//!
//! # Example
//!
//! ```no_run
//! use site_chart::config::{load_config, settings_from_env, RunConfig};
//! use std::path::Path;
//!
//! let file = load_config(Path::new("chart.toml")).unwrap();
//! let settings = file.merge(settings_from_env().unwrap());
//! let config = RunConfig::resolve(settings).unwrap();
//! println!("Crawler will use max depth: {}", config.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    RunConfig, Settings, DEFAULT_CONCURRENCY, DEFAULT_DEPTH, DEFAULT_RATE_LIMIT,
    DEFAULT_USER_AGENT,
};

// Re-export parser and validation functions
pub use parser::{
    default_config_path, load_config, load_default_config, settings_from_env,
    settings_from_vars, DEFAULT_CONFIG_FILE, ENV_PREFIX,
};
pub use validation::{clamp_concurrency, clamp_rate_limit, parse_duration};
