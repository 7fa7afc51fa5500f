//! Code-hosting search crawling.
//!
//! This module provides:
//! - Data models for search requests and result records
//! - Search URL construction
//! - Pattern-based link and language extraction
//! - Protocol traits for pluggable fetchers and extractors
//! - The crawler that ties them together

mod config;
mod crawler;
mod extract;
#[cfg(feature = "http")]
mod fetcher;
mod models;
mod protocols;
mod url;

#[cfg(test)]
mod integration_tests;

pub use config::{CrawlerConfig, FetchConfig};
pub use crawler::{owner_from_url, Crawler};
pub use extract::{
    extract_language_stats, extract_links, PatternLanguageExtractor, PatternLinkExtractor,
};
#[cfg(feature = "http")]
pub use fetcher::HttpFetcher;
pub use models::{LanguageStats, RepositoryDetails, SearchRecord, SearchRequest, SearchType};
pub use protocols::{Fetcher, LanguageExtractor, LinkExtractor};
pub use url::{build_search_url, quote_plus};
