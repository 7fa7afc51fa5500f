//! HTTP transport backed by `reqwest`.

use async_trait::async_trait;
use dashmap::DashMap;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Proxy};
use std::time::Instant;
use tracing::{debug, warn};

use super::config::FetchConfig;
use super::protocols::Fetcher;
use crate::errors::{CrawlerResult, InvalidArgumentError, TransportError};

/// [`Fetcher`] that issues plain GET requests.
///
/// Requests without a proxy share one client. A client per proxy address is
/// built on first use and reused afterwards.
#[derive(Debug)]
pub struct HttpFetcher {
    config: FetchConfig,
    client: Client,
    proxied: DashMap<String, Client>,
}

impl HttpFetcher {
    /// Creates a fetcher from its configuration.
    ///
    /// Fails if a configured header is not a valid HTTP header.
    pub fn new(config: FetchConfig) -> CrawlerResult<Self> {
        let client = build_client(&config, None)?;
        Ok(Self {
            config,
            client,
            proxied: DashMap::new(),
        })
    }

    /// Gets the configuration.
    #[must_use]
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    fn client_for(&self, proxy: Option<&str>) -> CrawlerResult<Client> {
        let Some(proxy) = proxy else {
            return Ok(self.client.clone());
        };

        if let Some(client) = self.proxied.get(proxy) {
            return Ok(client.clone());
        }

        let client = build_client(&self.config, Some(proxy))?;
        self.proxied.insert(proxy.to_string(), client.clone());
        Ok(client)
    }
}

fn build_client(config: &FetchConfig, proxy: Option<&str>) -> CrawlerResult<Client> {
    let mut headers = HeaderMap::new();
    for (key, value) in &config.headers {
        let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
            InvalidArgumentError::new("header name", key.as_str(), e.to_string())
        })?;
        let value = HeaderValue::from_str(value).map_err(|e| {
            InvalidArgumentError::new("header value", value.as_str(), e.to_string())
        })?;
        headers.insert(name, value);
    }

    let mut builder = Client::builder()
        .timeout(config.timeout())
        .user_agent(config.user_agent.as_str())
        .default_headers(headers);

    if let Some(proxy) = proxy {
        let proxy = Proxy::all(proxy)
            .map_err(|e| InvalidArgumentError::new("proxy", proxy, e.to_string()))?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| InvalidArgumentError::new("fetch config", "client", e.to_string()).into())
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, proxy: Option<&str>) -> CrawlerResult<String> {
        let client = self.client_for(proxy)?;
        let start = Instant::now();
        debug!(url = %url, proxy = ?proxy, "Fetching page");

        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::new(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Non-success response");
            return Err(TransportError::new(url, format!("HTTP {status}"))
                .with_status(status.as_u16())
                .into());
        }

        let text = response
            .text()
            .await
            .map_err(|e| TransportError::new(url, e.to_string()).with_status(status.as_u16()))?;

        debug!(
            url = %url,
            status = status.as_u16(),
            bytes = text.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Fetched page"
        );
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_with_defaults() {
        let fetcher = HttpFetcher::new(FetchConfig::default()).unwrap();
        assert_eq!(fetcher.config().timeout_seconds, 30.0);
    }

    #[test]
    fn test_new_rejects_bad_header() {
        let config = FetchConfig::new().with_header("bad header", "x");
        let err = HttpFetcher::new(config).unwrap_err();
        assert_eq!(err.kind(), "InvalidArgument");
    }

    #[test]
    fn test_new_rejects_bad_header_value() {
        let config = FetchConfig::new().with_header("X-Test", "line\nbreak");
        let err = HttpFetcher::new(config).unwrap_err();
        assert_eq!(err.kind(), "InvalidArgument");
    }

    #[test]
    fn test_proxied_clients_are_cached() {
        let fetcher = HttpFetcher::new(FetchConfig::default()).unwrap();

        fetcher.client_for(None).unwrap();
        assert!(fetcher.proxied.is_empty());

        fetcher.client_for(Some("http://10.0.0.1:3128")).unwrap();
        fetcher.client_for(Some("http://10.0.0.1:3128")).unwrap();
        assert_eq!(fetcher.proxied.len(), 1);

        fetcher.client_for(Some("10.0.0.2:8080")).unwrap();
        assert_eq!(fetcher.proxied.len(), 2);
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        let fetcher = HttpFetcher::new(FetchConfig::new().with_timeout(2.0)).unwrap();
        let err = fetcher
            .fetch("http://127.0.0.1:9/search", None)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "TransportFailure");
    }
}
