use crate::catalog::Source;
use crate::feed::parser::{extract_feed_with_limit, FeedItem, ParsedFeed};
use crate::http::{FetchError, FetchOptions, HttpFetcher};
use crate::util::{validate_url, NetworkPolicy};
use futures::future::join_all;
use serde::Serialize;
use url::Url;

/// How feeds are retrieved and how much of each is kept.
#[derive(Debug, Clone)]
pub struct FeedSettings {
    /// Timeout and body limit for each feed request
    pub options: FetchOptions,
    /// Which hosts feed URLs may point at
    pub policy: NetworkPolicy,
    /// Item cap applied by the extractor
    pub max_items: usize,
}

/// Result of fetching one source during a category fan-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FetchOutcome {
    Success { items: Vec<FeedItem> },
    Failure { message: String },
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success { .. })
    }
}

/// A source name paired with what happened when it was fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceReport {
    pub source: String,
    #[serde(flatten)]
    pub outcome: FetchOutcome,
}

/// Fetches an already-validated feed URL and extracts it.
///
/// Non-2xx responses are failures. Nothing is retried.
///
/// # Errors
///
/// - [`FetchError::Network`] - Connection or TLS errors
/// - [`FetchError::Timeout`] - Request exceeded the feed timeout
/// - [`FetchError::HttpStatus`] - Non-2xx HTTP response
/// - [`FetchError::ResponseTooLarge`] - Body exceeded the size limit
pub async fn fetch_feed(
    fetcher: &dyn HttpFetcher,
    url: &Url,
    settings: &FeedSettings,
) -> Result<ParsedFeed, FetchError> {
    let response = fetcher
        .fetch(url, &settings.options)
        .await?
        .error_for_status()?;

    let feed = extract_feed_with_limit(&response.text(), settings.max_items);
    tracing::debug!(url = %url, title = %feed.title, items = feed.items.len(), "Feed extracted");
    Ok(feed)
}

/// Validates a catalog source's URL, then fetches it.
///
/// An invalid URL surfaces as [`FetchError::InvalidUrl`] without any request.
pub async fn fetch_source(
    fetcher: &dyn HttpFetcher,
    source: &Source,
    settings: &FeedSettings,
) -> Result<ParsedFeed, FetchError> {
    let url = validate_url(&source.url, settings.policy)
        .map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
    fetch_feed(fetcher, &url, settings).await
}

/// Fetches the first `max_sources` sources concurrently.
///
/// Every selected source is requested at once and each one settles on its
/// own: a failure is recorded in that source's [`SourceReport`] and never
/// cancels the others. Successful item lists are cut to
/// `max_items_per_source`.
///
/// # Returns
///
/// One report per selected source, in the order the sources were given
/// (not completion order). An empty input yields an empty report; callers
/// that need to distinguish "no sources" do so before calling.
pub async fn fetch_category(
    fetcher: &dyn HttpFetcher,
    sources: &[&Source],
    max_sources: usize,
    max_items_per_source: usize,
    settings: &FeedSettings,
) -> Vec<SourceReport> {
    let selected = &sources[..sources.len().min(max_sources)];
    if selected.is_empty() {
        return Vec::new();
    }

    if sources.len() > selected.len() {
        tracing::debug!(
            available = sources.len(),
            fetching = selected.len(),
            "Capping category fan-out"
        );
    }

    // All selected fetches are in flight at once; results keep input order
    join_all(
        selected
            .iter()
            .map(|source| fetch_report(fetcher, source, max_items_per_source, settings)),
    )
    .await
}

async fn fetch_report(
    fetcher: &dyn HttpFetcher,
    source: &Source,
    max_items: usize,
    settings: &FeedSettings,
) -> SourceReport {
    let outcome = match fetch_source(fetcher, source, settings).await {
        Ok(mut feed) => {
            feed.items.truncate(max_items);
            FetchOutcome::Success { items: feed.items }
        }
        Err(e) => {
            tracing::warn!(
                source = %source.name,
                url = %source.url,
                error = %e,
                "Source fetch failed"
            );
            FetchOutcome::Failure {
                message: e.to_string(),
            }
        }
    };

    SourceReport {
        source: source.name.clone(),
        outcome,
    }
}
