//! Configuration types for the crawler and its HTTP transport.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use super::models::SearchRequest;

/// Configuration for HTTP fetching.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: f64,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Additional headers to include.
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

fn default_timeout() -> f64 {
    30.0
}

fn default_user_agent() -> String {
    concat!("repocrawl/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
            headers: HashMap::new(),
        }
    }
}

impl FetchConfig {
    /// Creates a new fetch configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the timeout.
    #[must_use]
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Gets timeout as Duration.
    ///
    /// Negative or non-finite values fall back to the default timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout_seconds)
            .unwrap_or_else(|_| Duration::from_secs_f64(default_timeout()))
    }
}

/// Combined configuration for a crawler instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrawlerConfig {
    /// Host serving the search and repository pages.
    #[serde(default = "default_host")]
    pub host: String,
    /// Proxy candidates; one is picked when a crawler is built.
    #[serde(default)]
    pub proxies: Vec<String>,
    /// Fetch configuration.
    #[serde(default)]
    pub fetch: FetchConfig,
}

fn default_host() -> String {
    "github.com".to_string()
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            proxies: Vec::new(),
            fetch: FetchConfig::default(),
        }
    }
}

impl CrawlerConfig {
    /// Creates a new crawler configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the proxy candidates.
    #[must_use]
    pub fn with_proxies<I, S>(mut self, proxies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.proxies = proxies.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the fetch configuration.
    #[must_use]
    pub fn with_fetch(mut self, fetch: FetchConfig) -> Self {
        self.fetch = fetch;
        self
    }

    /// Configuration for serving `request`.
    ///
    /// Proxy candidates in the request, when present, replace the configured ones.
    #[must_use]
    pub fn for_request(&self, request: &SearchRequest) -> Self {
        let mut config = self.clone();
        if !request.proxies.is_empty() {
            config.proxies.clone_from(&request.proxies);
        }
        config
    }

    /// Parses a configuration from JSON text.
    pub fn from_json(text: &str) -> crate::errors::CrawlerResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
