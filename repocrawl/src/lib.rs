//! # Repocrawl
//!
//! Extracts structured data from a code-hosting site's search results.
//!
//! A search fetches one results page and pulls out every result link. For
//! repository searches the crawler then visits each result's landing page
//! and adds the owner name and the language breakdown.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use repocrawl::prelude::*;
//!
//! # async fn run() -> Result<(), CrawlerError> {
//! let crawler = Crawler::http(&CrawlerConfig::default())?;
//! let request = SearchRequest::new(["hello", "world"]).with_result_type("Repositories");
//!
//! for record in crawler.search_extra(&request).await? {
//!     println!("{} {:?}", record.url, record.owner());
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod errors;
pub mod process;
pub mod search;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::errors::{
        CrawlerError, CrawlerResult, InvalidArgumentError, ParseAnomalyError, TransportError,
    };
    #[cfg(feature = "http")]
    pub use crate::search::HttpFetcher;
    pub use crate::search::{
        build_search_url, extract_language_stats, extract_links, Crawler, CrawlerConfig,
        FetchConfig, Fetcher, LanguageExtractor, LanguageStats, LinkExtractor, SearchRecord,
        SearchRequest, SearchType,
    };
}
