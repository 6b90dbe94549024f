//! HTTP retrieval shared by the feed and article paths.
//!
//! [`HttpFetcher`] is the seam between the extraction core and the network.
//! The production implementation wraps `reqwest`; tests substitute fakes that
//! count calls or inject failures.

use crate::util::{validate_url, NetworkPolicy};
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::redirect::Policy;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Redirect hops followed before giving up.
pub const MAX_REDIRECTS: usize = 5;

/// Errors that can occur while retrieving a document.
///
/// Timeouts get their own variant for logging, but callers surface every
/// variant as the same transport failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(String),
    /// HTTP response with non-2xx status code
    #[error("HTTP {status}: {reason}")]
    HttpStatus { status: u16, reason: String },
    /// Request exceeded the configured timeout
    #[error("Request timed out after {0}s")]
    Timeout(u64),
    /// Response body exceeded the configured size limit
    #[error("Response too large (exceeds {0} bytes)")]
    ResponseTooLarge(usize),
    /// Response was incomplete (received fewer bytes than Content-Length)
    #[error("Incomplete response: expected {expected} bytes, received {received}")]
    IncompleteResponse { expected: u64, received: usize },
    /// The target URL failed validation before any request was made
    #[error("{0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network(err.to_string())
    }
}

/// Per-request settings.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Upper bound for the whole exchange, body included
    pub timeout: Duration,
    /// Maximum accepted body size in bytes
    pub max_body_bytes: usize,
    /// Extra request headers
    pub headers: Vec<(&'static str, String)>,
}

impl FetchOptions {
    pub fn new(timeout: Duration, max_body_bytes: usize) -> Self {
        Self {
            timeout,
            max_body_bytes,
            headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }
}

/// A completed HTTP exchange, whatever its status.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    /// Canonical reason phrase for `status` ("Not Found"), may be empty
    pub reason: String,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Converts a non-2xx response into [`FetchError::HttpStatus`].
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(FetchError::HttpStatus {
                status: self.status,
                reason: self.reason,
            })
        }
    }

    /// Body decoded as UTF-8, with invalid sequences replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Generic HTTP GET.
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    async fn fetch(&self, url: &Url, options: &FetchOptions) -> Result<HttpResponse, FetchError>;
}

/// [`HttpFetcher`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Builds a client whose redirects are checked against `policy` hop by hop.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Network`] - the TLS backend could not be initialized
    pub fn with_policy(policy: NetworkPolicy) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .redirect(redirect_policy(policy))
            .build()?;
        Ok(Self { client })
    }
}

/// Follows at most [`MAX_REDIRECTS`] hops, rejects loops and re-validates
/// every redirect target so a public URL cannot bounce into a private one.
fn redirect_policy(policy: NetworkPolicy) -> Policy {
    Policy::custom(move |attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            return attempt.error(format!("Too many redirects (max {MAX_REDIRECTS})"));
        }

        let url = attempt.url();
        if attempt.previous().iter().any(|prev| prev == url) {
            return attempt.error("Redirect loop detected");
        }

        if let Err(e) = validate_url(url.as_str(), policy) {
            tracing::warn!(to = %url, error = %e, "Refusing redirect");
            let msg = format!("Redirect to {url} refused: {e}");
            return attempt.error(msg);
        }

        tracing::debug!(
            from = %attempt.previous().last().map(|u| u.as_str()).unwrap_or("initial"),
            to = %url,
            hop = attempt.previous().len() + 1,
            "Following redirect"
        );

        attempt.follow()
    })
}

#[async_trait]
impl HttpFetcher for ReqwestFetcher {
    async fn fetch(&self, url: &Url, options: &FetchOptions) -> Result<HttpResponse, FetchError> {
        let mut request = self.client.get(url.as_str());
        for (name, value) in &options.headers {
            request = request.header(*name, value.as_str());
        }

        let exchange = async {
            let response = request.send().await?;
            let status = response.status();
            let body = read_limited_bytes(response, options.max_body_bytes).await?;
            Ok::<_, FetchError>(HttpResponse {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            })
        };

        match tokio::time::timeout(options.timeout, exchange).await {
            Ok(result) => result,
            Err(_) => {
                tracing::debug!(url = %url, timeout_secs = options.timeout.as_secs(), "Request timed out");
                Err(FetchError::Timeout(options.timeout.as_secs()))
            }
        }
    }
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    // Capture Content-Length for completeness check
    let expected_length = response.content_length();

    // Fast path: check Content-Length header
    if let Some(len) = expected_length {
        if len > limit as u64 {
            return Err(FetchError::ResponseTooLarge(limit));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge(limit));
        }
        bytes.extend_from_slice(&chunk);
    }

    if let Some(expected) = expected_length {
        if (bytes.len() as u64) < expected {
            return Err(FetchError::IncompleteResponse {
                expected,
                received: bytes.len(),
            });
        }
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn options() -> FetchOptions {
        FetchOptions::new(Duration::from_secs(5), 1024 * 1024)
    }

    fn url(server: &MockServer, p: &str) -> Url {
        Url::parse(&format!("{}{}", server.uri(), p)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_success_returns_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<rss/>"))
            .mount(&mock_server)
            .await;

        let fetcher = ReqwestFetcher::default();
        let response = fetcher
            .fetch(&url(&mock_server, "/feed"), &options())
            .await
            .unwrap();
        assert!(response.is_success());
        assert_eq!(response.text(), "<rss/>");
    }

    #[tokio::test]
    async fn test_fetch_sends_custom_headers() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("User-Agent", "test-agent/1.0"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let fetcher = ReqwestFetcher::default();
        let opts = options().with_header("User-Agent", "test-agent/1.0");
        let response = fetcher.fetch(&url(&mock_server, "/"), &opts).await.unwrap();
        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn test_redirect_followed_when_private_allowed() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/old"))
            .respond_with(
                ResponseTemplate::new(301)
                    .insert_header("Location", format!("{}/new", mock_server.uri())),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/new"))
            .respond_with(ResponseTemplate::new(200).set_body_string("moved"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let fetcher = ReqwestFetcher::with_policy(NetworkPolicy::AllowPrivate).unwrap();
        let response = fetcher
            .fetch(&url(&mock_server, "/old"), &options())
            .await
            .unwrap();
        assert_eq!(response.text(), "moved");
    }

    #[tokio::test]
    async fn test_redirect_to_private_host_refused() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/start"))
            .respond_with(
                ResponseTemplate::new(302)
                    .insert_header("Location", format!("{}/internal", mock_server.uri())),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/internal"))
            .respond_with(ResponseTemplate::new(200).set_body_string("secret"))
            .expect(0)
            .mount(&mock_server)
            .await;

        let fetcher = ReqwestFetcher::with_policy(NetworkPolicy::PublicOnly).unwrap();
        let err = fetcher
            .fetch(&url(&mock_server, "/start"), &options())
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Network(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_redirect_loop_refused() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/a"))
            .respond_with(
                ResponseTemplate::new(302).insert_header("Location", format!("{}/b", mock_server.uri())),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/b"))
            .respond_with(
                ResponseTemplate::new(302).insert_header("Location", format!("{}/a", mock_server.uri())),
            )
            .mount(&mock_server)
            .await;

        let fetcher = ReqwestFetcher::with_policy(NetworkPolicy::AllowPrivate).unwrap();
        let err = fetcher
            .fetch(&url(&mock_server, "/a"), &options())
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Network(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_non_success_status_is_returned_not_raised() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let fetcher = ReqwestFetcher::default();
        let response = fetcher
            .fetch(&url(&mock_server, "/missing"), &options())
            .await
            .unwrap();
        assert_eq!(response.status, 404);

        let err = response.error_for_status().unwrap_err();
        assert_eq!(
            err,
            FetchError::HttpStatus {
                status: 404,
                reason: "Not Found".to_string()
            }
        );
        assert_eq!(err.to_string(), "HTTP 404: Not Found");
    }

    #[tokio::test]
    async fn test_timeout() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("slow")
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&mock_server)
            .await;

        let fetcher = ReqwestFetcher::default();
        let opts = FetchOptions::new(Duration::from_millis(200), 1024);
        let err = fetcher
            .fetch(&url(&mock_server, "/slow"), &opts)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_response_too_large() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(2048)))
            .mount(&mock_server)
            .await;

        let fetcher = ReqwestFetcher::default();
        let opts = FetchOptions::new(Duration::from_secs(5), 1024);
        let err = fetcher
            .fetch(&url(&mock_server, "/big"), &opts)
            .await
            .unwrap_err();
        assert_eq!(err, FetchError::ResponseTooLarge(1024));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Port 9 (discard) is essentially never listening on test machines
        let fetcher = ReqwestFetcher::default();
        let target = Url::parse("http://127.0.0.1:9/feed").unwrap();
        let err = fetcher.fetch(&target, &options()).await.unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
    }

    #[test]
    fn test_lossy_text_decoding() {
        let response = HttpResponse {
            status: 200,
            reason: "OK".to_string(),
            body: vec![b'a', 0xff, b'b'],
        };
        assert_eq!(response.text(), "a\u{fffd}b");
    }
}
