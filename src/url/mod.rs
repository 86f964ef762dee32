//! URL handling module for Site Chart
//!
//! This module provides address normalization (the deduplication key for
//! the crawl) and origin scoping (which discovered links count as in-site).

mod normalize;
mod origin;

// Re-export main functions
pub use normalize::normalize_url;
pub use origin::{effective_origin, same_origin};
