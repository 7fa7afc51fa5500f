//! The crawler: search page, then one landing page per repository result.

use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use super::config::CrawlerConfig;
use super::extract::{PatternLanguageExtractor, PatternLinkExtractor};
use super::models::{SearchRecord, SearchRequest};
use super::protocols::{Fetcher, LanguageExtractor, LinkExtractor};
use super::url::build_search_url;
use crate::errors::{CrawlerError, CrawlerResult};

/// Runs searches and enriches repository results.
///
/// The proxy is picked once, when the crawler is built, and every request the
/// instance makes goes through it. Requests are issued one at a time.
pub struct Crawler {
    run_id: Uuid,
    host: String,
    proxy: Option<String>,
    fetcher: Arc<dyn Fetcher>,
    links: Arc<dyn LinkExtractor>,
    languages: Arc<dyn LanguageExtractor>,
}

impl std::fmt::Debug for Crawler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Crawler")
            .field("run_id", &self.run_id)
            .field("host", &self.host)
            .field("proxy", &self.proxy)
            .finish_non_exhaustive()
    }
}

impl Crawler {
    /// Creates a crawler, picking a proxy uniformly from `config.proxies`.
    #[must_use]
    pub fn new(fetcher: Arc<dyn Fetcher>, config: &CrawlerConfig) -> Self {
        Self::with_rng(fetcher, config, &mut rand::thread_rng())
    }

    /// Creates a crawler, picking the proxy with the given RNG.
    #[must_use]
    pub fn with_rng<R: Rng + ?Sized>(
        fetcher: Arc<dyn Fetcher>,
        config: &CrawlerConfig,
        rng: &mut R,
    ) -> Self {
        let proxy = config.proxies.choose(rng).cloned();
        let run_id = Uuid::new_v4();
        debug!(run_id = %run_id, proxy = ?proxy, candidates = config.proxies.len(), "Crawler created");

        Self {
            run_id,
            host: config.host.clone(),
            proxy,
            fetcher,
            links: Arc::new(PatternLinkExtractor),
            languages: Arc::new(PatternLanguageExtractor),
        }
    }

    /// Creates a crawler backed by [`HttpFetcher`](super::HttpFetcher).
    #[cfg(feature = "http")]
    pub fn http(config: &CrawlerConfig) -> CrawlerResult<Self> {
        let fetcher = super::fetcher::HttpFetcher::new(config.fetch.clone())?;
        Ok(Self::new(Arc::new(fetcher), config))
    }

    /// Replaces the link extraction strategy.
    #[must_use]
    pub fn with_link_extractor(mut self, extractor: Arc<dyn LinkExtractor>) -> Self {
        self.links = extractor;
        self
    }

    /// Replaces the language extraction strategy.
    #[must_use]
    pub fn with_language_extractor(mut self, extractor: Arc<dyn LanguageExtractor>) -> Self {
        self.languages = extractor;
        self
    }

    /// The proxy used for every request, if any.
    #[must_use]
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// The host searched.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Identifier attached to this instance's log events.
    #[must_use]
    pub const fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Fetches the search page and returns one record per result link.
    ///
    /// The result type is validated before any request is made.
    pub async fn search(&self, request: &SearchRequest) -> CrawlerResult<Vec<SearchRecord>> {
        let url = build_search_url(&self.host, &request.keywords, &request.result_type)?;
        info!(run_id = %self.run_id, url = %url, "Searching");

        let page = self.get(&url).await?;
        let records: Vec<SearchRecord> = self
            .links
            .extract_links(&page)
            .into_iter()
            .map(SearchRecord::new)
            .collect();

        info!(run_id = %self.run_id, links = records.len(), "Search complete");
        Ok(records)
    }

    /// Like [`search`](Self::search), but repository results also get their
    /// owner and language breakdown, one landing-page request per result.
    ///
    /// Non-repository result types are returned as plain records. Any failed
    /// landing page aborts the whole call.
    pub async fn search_extra(&self, request: &SearchRequest) -> CrawlerResult<Vec<SearchRecord>> {
        let records = self.search(request).await?;
        if !request.search_type()?.is_repository() {
            return Ok(records);
        }

        let mut enriched = Vec::with_capacity(records.len());
        for record in records {
            let owner = owner_from_url(&record.url)?;
            let page = self.get(&record.url).await?;
            let stats = self.languages.extract_language_stats(&page)?;
            debug!(
                run_id = %self.run_id,
                url = %record.url,
                owner = %owner,
                languages = stats.len(),
                "Repository enriched"
            );
            enriched.push(record.with_details(owner, stats));
        }

        Ok(enriched)
    }

    /// Builds a single-use crawler and runs [`search_extra`](Self::search_extra).
    ///
    /// Proxy candidates in the request take precedence over the config's.
    #[cfg(feature = "http")]
    pub async fn oneshot(
        request: &SearchRequest,
        config: &CrawlerConfig,
    ) -> CrawlerResult<Vec<SearchRecord>> {
        let config = config.for_request(request);
        Self::http(&config)?.search_extra(request).await
    }

    /// Same as [`oneshot`](Self::oneshot) with a caller-supplied fetcher.
    pub async fn oneshot_with(
        fetcher: Arc<dyn Fetcher>,
        request: &SearchRequest,
        config: &CrawlerConfig,
    ) -> CrawlerResult<Vec<SearchRecord>> {
        let config = config.for_request(request);
        Self::new(fetcher, &config).search_extra(request).await
    }

    async fn get(&self, url: &str) -> CrawlerResult<String> {
        self.fetcher.fetch(url, self.proxy.as_deref()).await
    }
}

/// Returns the owner of a `.../<owner>/<repo>` URL.
///
/// The owner is the second-to-last `/`-separated path component. A
/// `scheme://host` prefix is not part of the path. URLs whose path has fewer
/// than two non-empty components, or an empty owner component, are rejected.
pub fn owner_from_url(url: &str) -> CrawlerResult<String> {
    let path = match url.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("", |i| &rest[i..]),
        None => url,
    };

    if path.split('/').filter(|s| !s.is_empty()).count() < 2 {
        return Err(CrawlerError::malformed_url(url, "expected .../<owner>/<repo>"));
    }

    match path.rsplit('/').nth(1) {
        Some(owner) if !owner.is_empty() => Ok(owner.to_string()),
        _ => Err(CrawlerError::malformed_url(url, "owner component is empty")),
    }
}
