//! Mock fetchers for testing.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

use crate::errors::{CrawlerResult, TransportError};
use crate::search::Fetcher;

/// A recorded fetch call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedFetch {
    /// Requested URL.
    pub url: String,
    /// Proxy the request went through.
    pub proxy: Option<String>,
}

/// A fetcher serving canned pages by URL.
///
/// Unknown URLs fail with a 404 transport error. Every call is recorded,
/// including failed ones.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
    failures: HashMap<String, u16>,
    calls: Mutex<Vec<RecordedFetch>>,
}

impl StaticFetcher {
    /// Creates a fetcher with no pages.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `body` for `url`.
    #[must_use]
    pub fn with_page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages.insert(url.into(), body.into());
        self
    }

    /// Answers `url` with the given HTTP status.
    #[must_use]
    pub fn with_failure(mut self, url: impl Into<String>, status: u16) -> Self {
        self.failures.insert(url.into(), status);
        self
    }

    /// Returns every call made so far.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedFetch> {
        self.calls.lock().clone()
    }

    /// Returns the requested URLs in call order.
    #[must_use]
    pub fn requested_urls(&self) -> Vec<String> {
        self.calls.lock().iter().map(|c| c.url.clone()).collect()
    }

    /// Returns the number of calls.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Clears recorded calls.
    pub fn reset(&self) {
        self.calls.lock().clear();
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &str, proxy: Option<&str>) -> CrawlerResult<String> {
        self.calls.lock().push(RecordedFetch {
            url: url.to_string(),
            proxy: proxy.map(str::to_string),
        });

        if let Some(status) = self.failures.get(url) {
            return Err(TransportError::new(url, format!("HTTP {status}"))
                .with_status(*status)
                .into());
        }

        self.pages.get(url).cloned().ok_or_else(|| {
            TransportError::new(url, "HTTP 404 Not Found")
                .with_status(404)
                .into()
        })
    }
}

/// A fetcher whose every request fails.
#[derive(Debug)]
pub struct FailingFetcher {
    message: String,
    calls: Mutex<usize>,
}

impl FailingFetcher {
    /// Creates a failing fetcher.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            calls: Mutex::new(0),
        }
    }

    /// Returns the number of calls.
    #[must_use]
    pub fn call_count(&self) -> usize {
        *self.calls.lock()
    }
}

#[async_trait]
impl Fetcher for FailingFetcher {
    async fn fetch(&self, url: &str, _proxy: Option<&str>) -> CrawlerResult<String> {
        *self.calls.lock() += 1;
        Err(TransportError::new(url, self.message.clone()).into())
    }
}
