//! End-to-end tests for the search pipeline.

#[cfg(test)]
mod tests {
    use crate::process::{read_request, render_records};
    use crate::search::{build_search_url, Crawler, CrawlerConfig, Fetcher, SearchRequest};
    use crate::testing::{repository_page, search_page, StaticFetcher};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;
    use std::sync::Arc;

    const NGINX_RESULTS: [&str; 3] = [
        "https://github.com/nginx/nginx",
        "https://github.com/openresty/openresty",
        "https://github.com/jupyter/docker-stacks",
    ];

    fn nginx_site() -> StaticFetcher {
        let search = build_search_url("github.com", &["nginx"], "Repositories").unwrap();
        StaticFetcher::new()
            .with_page(search, search_page(&NGINX_RESULTS))
            .with_page(NGINX_RESULTS[0], repository_page(&[("C", 96.4), ("Vim Script", 2.6)]))
            .with_page(NGINX_RESULTS[1], repository_page(&[("C", 60.0), ("Perl", 40.0)]))
            .with_page(
                NGINX_RESULTS[2],
                repository_page(&[("Jupyter Notebook", 70.1), ("Python", 29.9)]),
            )
    }

    #[tokio::test]
    async fn test_request_to_rendered_output() {
        let fetcher = Arc::new(nginx_site());
        let request = read_request(Cursor::new(
            "{\n    \"keywords\": [\"nginx\"],\n    \"type\": \"Repositories\"\n}\n",
        ))
        .unwrap();

        let records = Crawler::oneshot_with(fetcher.clone(), &request, &CrawlerConfig::default())
            .await
            .unwrap();
        let rendered: serde_json::Value =
            serde_json::from_str(&render_records(&records).unwrap()).unwrap();

        assert_eq!(
            rendered,
            serde_json::json!([
                {
                    "url": "https://github.com/nginx/nginx",
                    "extra": {
                        "owner": "nginx",
                        "language_stats": {"C": 96.4, "Vim Script": 2.6}
                    }
                },
                {
                    "url": "https://github.com/openresty/openresty",
                    "extra": {
                        "owner": "openresty",
                        "language_stats": {"C": 60.0, "Perl": 40.0}
                    }
                },
                {
                    "url": "https://github.com/jupyter/docker-stacks",
                    "extra": {
                        "owner": "jupyter",
                        "language_stats": {"Jupyter Notebook": 70.1, "Python": 29.9}
                    }
                }
            ])
        );
        assert_eq!(fetcher.call_count(), 1 + NGINX_RESULTS.len());
    }

    #[tokio::test]
    async fn test_detail_requests_follow_listing_order() {
        let fetcher = Arc::new(nginx_site());
        let crawler = Crawler::new(fetcher.clone(), &CrawlerConfig::default());

        crawler
            .search_extra(&SearchRequest::new(["nginx"]).with_result_type("Repositories"))
            .await
            .unwrap();

        assert_eq!(&fetcher.requested_urls()[1..], NGINX_RESULTS);
    }

    #[tokio::test]
    async fn test_plain_search_skips_detail_pages() {
        let fetcher = Arc::new(nginx_site());
        let crawler = Crawler::new(fetcher.clone(), &CrawlerConfig::default());

        let records = crawler
            .search(&SearchRequest::new(["nginx"]).with_result_type("Repositories"))
            .await
            .unwrap();

        assert_eq!(
            records.iter().map(|r| r.url.as_str()).collect::<Vec<_>>(),
            NGINX_RESULTS
        );
        assert!(records.iter().all(|r| r.extra.is_none()));
        assert_eq!(fetcher.call_count(), 1);
    }

    #[tokio::test]
    async fn test_repeated_searches_are_identical() {
        let fetcher = Arc::new(nginx_site());
        let crawler = Crawler::new(fetcher.clone(), &CrawlerConfig::default());
        let request = SearchRequest::new(["nginx"]).with_result_type("Repositories");

        let first = crawler.search_extra(&request).await.unwrap();
        let second = crawler.search_extra(&request).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_fetcher_sees_exact_search_url() {
        let fetcher = Arc::new(StaticFetcher::new());
        let crawler = Crawler::new(fetcher.clone(), &CrawlerConfig::default());

        let _ = crawler
            .search(&SearchRequest::new(["Hello", "✓"]).with_result_type("Repositories"))
            .await;

        assert_eq!(
            fetcher.requested_urls(),
            vec!["https://github.com/search?q=Hello+%E2%9C%93&type=Repositories"]
        );
    }

    #[tokio::test]
    async fn test_fetcher_trait_object_is_shareable() {
        let fetcher: Arc<dyn Fetcher> = Arc::new(nginx_site());
        let a = Crawler::new(fetcher.clone(), &CrawlerConfig::default());
        let b = Crawler::new(fetcher, &CrawlerConfig::default());
        let request = SearchRequest::new(["nginx"]).with_result_type("Repositories");

        assert_eq!(
            a.search(&request).await.unwrap(),
            b.search(&request).await.unwrap()
        );
    }
}
