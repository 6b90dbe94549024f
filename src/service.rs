//! The news operations exposed to the MCP layer.
//!
//! [`NewsService`] ties the catalog, the configured limits and an
//! [`HttpFetcher`] together. It knows nothing about JSON-RPC; failures come
//! back as [`NewsError`] and the caller maps them onto its envelope.

use crate::catalog::{Catalog, Source};
use crate::config::Config;
use crate::content::{article_fetch_options, fetch_article, ParsedArticle};
use crate::error::NewsError;
use crate::feed::{fetch_category, fetch_feed, fetch_source, ParsedFeed, SourceReport};
use crate::http::HttpFetcher;
use crate::util::validate_url;
use serde::Serialize;
use std::sync::Arc;

/// Outcome of a category request. Individual sources may have failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryReport {
    pub category: String,
    /// Number of sources actually fetched (after the per-category cap)
    pub sources_checked: usize,
    /// One entry per fetched source, in catalog order
    pub outcomes: Vec<SourceReport>,
}

/// A catalog source together with its freshly fetched feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFeed {
    pub source: Source,
    pub feed: ParsedFeed,
}

/// Sources matching a listing request, plus every known category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceListing {
    /// Category filter that was applied, if any
    pub category: Option<String>,
    pub sources: Vec<Source>,
    pub categories: Vec<String>,
}

#[derive(Clone)]
pub struct NewsService {
    fetcher: Arc<dyn HttpFetcher>,
    catalog: Arc<Catalog>,
    config: Arc<Config>,
}

impl NewsService {
    pub fn new(fetcher: Arc<dyn HttpFetcher>, catalog: Arc<Catalog>, config: Arc<Config>) -> Self {
        Self {
            fetcher,
            catalog,
            config,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetches and extracts the feed at `url`.
    ///
    /// # Errors
    ///
    /// - [`NewsError::InvalidInput`] - `url` is not an acceptable http(s) URL;
    ///   no request is made
    /// - [`NewsError::Transport`] - the fetch failed
    pub async fn get_feed(&self, url: &str) -> Result<ParsedFeed, NewsError> {
        let url = validate_url(url, self.config.network_policy())
            .map_err(|e| NewsError::InvalidInput(e.to_string()))?;

        tracing::debug!(url = %url, "Fetching feed");
        let feed = fetch_feed(self.fetcher.as_ref(), &url, &self.config.feed_settings())
            .await
            .map_err(NewsError::from)
            .inspect_err(|e| {
                tracing::warn!(url = %url, error = %e, timeout = e.is_timeout(), "Feed fetch failed")
            })?;
        Ok(feed)
    }

    /// Fetches the page at `url` and extracts its readable content.
    ///
    /// # Errors
    ///
    /// - [`NewsError::InvalidInput`] - `url` is not an acceptable http(s) URL;
    ///   no request is made
    /// - [`NewsError::Transport`] - the fetch failed or timed out
    pub async fn get_article(&self, url: &str) -> Result<ParsedArticle, NewsError> {
        let url = validate_url(url, self.config.network_policy())
            .map_err(|e| NewsError::InvalidInput(e.to_string()))?;

        let options =
            article_fetch_options(self.config.article_timeout(), &self.config.user_agent());

        tracing::debug!(url = %url, "Fetching article");
        let article = fetch_article(self.fetcher.as_ref(), &url, &options)
            .await
            .map_err(NewsError::from)
            .inspect_err(|e| {
                tracing::warn!(url = %url, error = %e, timeout = e.is_timeout(), "Article fetch failed")
            })?;
        Ok(article)
    }

    /// Fetches the first sources of `category` concurrently.
    ///
    /// `max_items_per_source` of `None` or `0` means the configured default.
    ///
    /// # Errors
    ///
    /// - [`NewsError::NotFound`] - no catalog source has this category; the
    ///   message lists the available ones
    ///
    /// Failing sources do not make the call fail; they are reported in
    /// [`CategoryReport::outcomes`].
    pub async fn get_category(
        &self,
        category: &str,
        max_items_per_source: Option<usize>,
    ) -> Result<CategoryReport, NewsError> {
        let sources = self.catalog.list_by_category(category);
        if sources.is_empty() {
            return Err(NewsError::NotFound(format!(
                "No sources found for category: {}. Available categories: {}",
                category,
                self.categories_or_na()
            )));
        }

        let limits = &self.config.limits;
        let max_items = max_items_per_source
            .filter(|&n| n > 0)
            .unwrap_or(limits.default_items_per_source);

        let outcomes = fetch_category(
            self.fetcher.as_ref(),
            &sources,
            limits.max_sources_per_category,
            max_items,
            &self.config.feed_settings(),
        )
        .await;

        let failed = outcomes.iter().filter(|r| !r.outcome.is_success()).count();
        tracing::info!(
            category,
            sources = outcomes.len(),
            failed,
            "Category fetch complete"
        );

        Ok(CategoryReport {
            category: category.to_string(),
            sources_checked: outcomes.len(),
            outcomes,
        })
    }

    /// Fetches the feed of the catalog source called `name` (exact match).
    ///
    /// `max_items` of `None` or `0` means the configured default.
    ///
    /// # Errors
    ///
    /// - [`NewsError::NotFound`] - no source has this name
    /// - [`NewsError::Transport`] - the fetch failed
    pub async fn get_by_source_name(
        &self,
        name: &str,
        max_items: Option<usize>,
    ) -> Result<SourceFeed, NewsError> {
        let source = self.catalog.find_by_name(name).ok_or_else(|| {
            NewsError::NotFound(format!(
                "Source not found: {}. Use list_news_sources to see available sources.",
                name
            ))
        })?;

        let max_items = max_items
            .filter(|&n| n > 0)
            .unwrap_or(self.config.limits.default_items_per_source_name);

        let mut feed = fetch_source(self.fetcher.as_ref(), source, &self.config.feed_settings())
            .await
            .inspect_err(|e| tracing::warn!(source = %source.name, error = %e, "Source fetch failed"))?;
        feed.items.truncate(max_items);

        Ok(SourceFeed {
            source: source.clone(),
            feed,
        })
    }

    /// Catalog sources, optionally restricted to one category.
    ///
    /// An unknown category yields an empty list rather than an error.
    pub fn list_sources(&self, category: Option<&str>) -> SourceListing {
        let category = category.filter(|c| !c.is_empty());
        let sources = match category {
            Some(c) => self.catalog.list_by_category(c).into_iter().cloned().collect(),
            None => self.catalog.all().to_vec(),
        };

        SourceListing {
            category: category.map(str::to_string),
            sources,
            categories: self
                .catalog
                .all_categories()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }

    fn categories_or_na(&self) -> String {
        let categories = self.catalog.all_categories();
        if categories.is_empty() {
            "N/A".to_string()
        } else {
            categories.join(", ")
        }
    }
}
