//! Output module for rendering crawl and check results
//!
//! This module handles:
//! - XML sitemaps (sitemaps.org 0.9 schema)
//! - Plain text page listings
//! - Live/dead link reports

mod report;
mod sitemap;

pub use report::write_report;
pub use sitemap::{write_pages, write_sitemap, write_text, SITEMAP_XMLNS};

use crate::ConfigError;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Output format for the `build` command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// XML sitemap document
    #[default]
    Xml,
    /// One address per line
    Txt,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Xml => "xml",
            Self::Txt => "txt",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xml" => Ok(Self::Xml),
            "txt" => Ok(Self::Txt),
            other => Err(ConfigError::Validation(format!(
                "format must be 'xml' or 'txt', got '{}'",
                other
            ))),
        }
    }
}
