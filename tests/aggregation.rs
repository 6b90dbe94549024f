//! Integration tests for category fan-out and article URL handling.
//!
//! A scripted in-process fetcher stands in for the network so that call
//! counts, delays and per-URL failures are exact.

use async_trait::async_trait;
use newsfeed_mcp::feed::FetchOutcome;
use newsfeed_mcp::http::{FetchError, FetchOptions, HttpFetcher, HttpResponse};
use newsfeed_mcp::{Catalog, Config, NewsError, NewsService, Source};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

enum Script {
    Feed { items: usize, delay: Duration },
    Fail(FetchError),
}

/// Fake fetcher keyed by URL that records every request.
#[derive(Default)]
struct ScriptedFetcher {
    scripts: HashMap<String, Script>,
    requested: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    fn feed(mut self, url: &str, items: usize, delay_ms: u64) -> Self {
        self.scripts.insert(
            url.to_string(),
            Script::Feed {
                items,
                delay: Duration::from_millis(delay_ms),
            },
        );
        self
    }

    fn fail(mut self, url: &str, error: FetchError) -> Self {
        self.scripts.insert(url.to_string(), Script::Fail(error));
        self
    }

    fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpFetcher for ScriptedFetcher {
    async fn fetch(&self, url: &Url, _options: &FetchOptions) -> Result<HttpResponse, FetchError> {
        self.requested.lock().unwrap().push(url.to_string());

        match self.scripts.get(url.as_str()) {
            Some(Script::Feed { items, delay }) => {
                tokio::time::sleep(*delay).await;
                let items: String = (0..*items)
                    .map(|i| format!("<item><title>{url} #{i}</title><link>{url}{i}</link></item>"))
                    .collect();
                Ok(HttpResponse {
                    status: 200,
                    reason: "OK".to_string(),
                    body: format!("<rss><channel><title>{url}</title>{items}</channel></rss>")
                        .into_bytes(),
                })
            }
            Some(Script::Fail(error)) => Err(error.clone()),
            None => Ok(HttpResponse {
                status: 404,
                reason: "Not Found".to_string(),
                body: Vec::new(),
            }),
        }
    }
}

fn feed_url(n: usize) -> String {
    format!("https://feeds.example.com/{n}.xml")
}

fn sources(category: &str, count: usize) -> Vec<Source> {
    (1..=count)
        .map(|n| Source {
            name: format!("Source {n}"),
            url: feed_url(n),
            category: category.to_string(),
            language: "en".to_string(),
            verified: true,
        })
        .collect()
}

fn service(fetcher: Arc<ScriptedFetcher>, sources: Vec<Source>) -> NewsService {
    NewsService::new(
        fetcher,
        Arc::new(Catalog::new(sources)),
        Arc::new(Config::default()),
    )
}

fn items(outcome: &FetchOutcome) -> usize {
    match outcome {
        FetchOutcome::Success { items } => items.len(),
        FetchOutcome::Failure { message } => panic!("Expected success, got failure: {message}"),
    }
}

#[tokio::test]
async fn test_seven_sources_only_first_five_fetched() {
    let mut fetcher = ScriptedFetcher::default();
    for n in 1..=7 {
        fetcher = fetcher.feed(&feed_url(n), 3, 0);
    }
    let fetcher = Arc::new(fetcher);
    let svc = service(fetcher.clone(), sources("tech", 7));

    let report = svc.get_category("tech", None).await.unwrap();

    assert_eq!(report.sources_checked, 5);
    assert_eq!(report.outcomes.len(), 5);

    let mut requested = fetcher.requested();
    requested.sort();
    let expected: Vec<String> = (1..=5).map(feed_url).collect();
    assert_eq!(requested, expected);
}

#[tokio::test]
async fn test_timeout_on_second_source_keeps_order_and_others() {
    let fetcher = Arc::new(
        ScriptedFetcher::default()
            // Completion order differs from submission order on purpose
            .feed(&feed_url(1), 8, 60)
            .fail(&feed_url(2), FetchError::Timeout(30))
            .feed(&feed_url(3), 2, 30)
            .feed(&feed_url(4), 8, 0)
            .feed(&feed_url(5), 8, 10),
    );
    let svc = service(fetcher.clone(), sources("general", 5));

    let report = svc.get_category("general", Some(4)).await.unwrap();

    let names: Vec<_> = report.outcomes.iter().map(|r| r.source.as_str()).collect();
    assert_eq!(
        names,
        vec!["Source 1", "Source 2", "Source 3", "Source 4", "Source 5"]
    );

    assert_eq!(items(&report.outcomes[0].outcome), 4);
    match &report.outcomes[1].outcome {
        FetchOutcome::Failure { message } => {
            assert_eq!(message, "Request timed out after 30s");
        }
        other => panic!("Expected failure for source 2, got {other:?}"),
    }
    assert_eq!(items(&report.outcomes[2].outcome), 2);
    assert_eq!(items(&report.outcomes[3].outcome), 4);
    assert_eq!(items(&report.outcomes[4].outcome), 4);
}

#[tokio::test(start_paused = true)]
async fn test_all_sources_fetched_concurrently() {
    let mut fetcher = ScriptedFetcher::default();
    for n in 1..=5 {
        fetcher = fetcher.feed(&feed_url(n), 1, 200);
    }
    let svc = service(Arc::new(fetcher), sources("tech", 5));

    // Sequential fetching would take a full second of virtual time
    let started = tokio::time::Instant::now();
    let report = svc.get_category("tech", None).await.unwrap();
    assert_eq!(report.outcomes.len(), 5);
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(200));
    assert!(elapsed < Duration::from_millis(400), "took {elapsed:?}");
}

#[tokio::test]
async fn test_http_error_source_is_reported_not_raised() {
    // Source 2 has no script and gets a 404
    let fetcher = Arc::new(ScriptedFetcher::default().feed(&feed_url(1), 1, 0));
    let svc = service(fetcher, sources("tech", 2));

    let report = svc.get_category("tech", None).await.unwrap();
    assert!(report.outcomes[0].outcome.is_success());
    assert_eq!(
        report.outcomes[1].outcome,
        FetchOutcome::Failure {
            message: "HTTP 404: Not Found".to_string()
        }
    );
}

#[tokio::test]
async fn test_empty_category_is_not_found_with_categories() {
    let fetcher = Arc::new(ScriptedFetcher::default());
    let mut all = sources("tech", 2);
    all.extend(sources("crypto", 1).into_iter().map(|mut s| {
        s.name = "Coin".to_string();
        s
    }));
    let svc = service(fetcher.clone(), all);

    let err = svc.get_category("sports", None).await.unwrap_err();
    match err {
        NewsError::NotFound(message) => {
            assert!(message.contains("sports"));
            assert!(message.ends_with("Available categories: tech, crypto"));
        }
        other => panic!("Expected NotFound, got {other:?}"),
    }
    assert!(fetcher.requested().is_empty());
}

#[tokio::test]
async fn test_article_invalid_url_makes_no_fetch() {
    let fetcher = Arc::new(ScriptedFetcher::default());
    let svc = service(fetcher.clone(), Vec::new());

    let err = svc.get_article("not-a-url").await.unwrap_err();
    assert!(matches!(err, NewsError::InvalidInput(_)));
    assert_eq!(err.code(), -32602);
    assert_eq!(fetcher.requested().len(), 0);
}

#[tokio::test]
async fn test_article_timeout_is_transport_error() {
    let url = "https://news.example.com/story";
    let fetcher = Arc::new(ScriptedFetcher::default().fail(url, FetchError::Timeout(20)));
    let svc = service(fetcher.clone(), Vec::new());

    let err = svc.get_article(url).await.unwrap_err();
    assert!(matches!(err, NewsError::Transport(_)));
    assert_eq!(err.code(), -32603);
    assert_eq!(fetcher.requested(), vec![url.to_string()]);
}
