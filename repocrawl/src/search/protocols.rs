//! Protocol traits for crawler components.
//!
//! The crawler talks to the network and to its two extraction strategies
//! only through these traits, so a transport or a matching strategy can be
//! swapped without touching the aggregation logic.

use async_trait::async_trait;

use super::models::LanguageStats;
use crate::errors::CrawlerResult;

/// Protocol for fetching page text.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `url`, optionally through `proxy`, and returns the response body.
    ///
    /// Any failure, including a non-success status, is a transport error.
    async fn fetch(&self, url: &str, proxy: Option<&str>) -> CrawlerResult<String>;
}

/// Protocol for pulling result links out of a search page.
pub trait LinkExtractor: Send + Sync {
    /// Returns result links in order of appearance.
    fn extract_links(&self, text: &str) -> Vec<String>;
}

/// Protocol for pulling the language breakdown out of a repository page.
pub trait LanguageExtractor: Send + Sync {
    /// Returns the language breakdown, empty when the page has none.
    fn extract_language_stats(&self, text: &str) -> CrawlerResult<LanguageStats>;
}
