//! Catalog verification.
//!
//! Fetches every source in a list and sorts it into the ones that return at
//! least one feed item and the ones that don't. The `verify` subcommand writes
//! both lists to JSON so the verified list can be fed back in through
//! `NEWS_SOURCES_FILE`.

use crate::catalog::Source;
use crate::feed::{fetch_source, FeedSettings};
use crate::http::HttpFetcher;
use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Default number of sources checked at once.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// A source that could not be verified, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedSource {
    #[serde(flatten)]
    pub source: Source,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationReport {
    /// Working sources, marked `verified`, in input order
    pub verified: Vec<Source>,
    /// Failing sources in input order
    pub failed: Vec<FailedSource>,
}

impl VerificationReport {
    pub fn total(&self) -> usize {
        self.verified.len() + self.failed.len()
    }

    /// Verified source count per category, largest first.
    pub fn verified_by_category(&self) -> Vec<(&str, usize)> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for source in &self.verified {
            *counts.entry(source.category.as_str()).or_default() += 1;
        }
        let mut counts: Vec<_> = counts.into_iter().collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }
}

/// Checks every source with bounded concurrency.
///
/// A source passes when its feed can be fetched and yields at least one item.
/// Progress is reported as `(completed, total)` after each source settles;
/// a dropped receiver is logged and otherwise ignored.
pub async fn verify_sources(
    fetcher: &dyn HttpFetcher,
    sources: Vec<Source>,
    settings: &FeedSettings,
    concurrency: usize,
    progress_tx: Option<mpsc::Sender<(usize, usize)>>,
) -> VerificationReport {
    if sources.is_empty() {
        return VerificationReport::default();
    }

    let total = sources.len();
    let completed = Arc::new(AtomicUsize::new(0));

    let mut results: Vec<(usize, Result<Source, FailedSource>)> =
        stream::iter(sources.into_iter().enumerate())
            .map(|(index, mut source)| {
                let progress_tx = progress_tx.clone();
                let completed = completed.clone();

                async move {
                    let failure = match fetch_source(fetcher, &source, settings).await {
                        Ok(feed) if !feed.items.is_empty() => None,
                        Ok(_) => Some("No feed items returned".to_string()),
                        Err(e) => Some(e.to_string()),
                    };

                    let done = completed.fetch_add(1, Ordering::Relaxed).saturating_add(1);
                    if let Some(tx) = progress_tx {
                        if let Err(e) = tx.send((done, total)).await {
                            tracing::warn!(error = %e, done, total, "Progress channel send failed (receiver dropped)");
                        }
                    }

                    let result = match failure {
                        None => {
                            source.verified = true;
                            Ok(source)
                        }
                        Some(error) => {
                            tracing::warn!(source = %source.name, error = %error, "Source failed verification");
                            source.verified = false;
                            Err(FailedSource { source, error })
                        }
                    };
                    (index, result)
                }
            })
            .buffer_unordered(concurrency.max(1))
            .collect()
            .await;

    results.sort_by_key(|(index, _)| *index);

    let mut report = VerificationReport::default();
    for (_, result) in results {
        match result {
            Ok(source) => report.verified.push(source),
            Err(failed) => report.failed.push(failed),
        }
    }
    report
}

/// Reads a JSON source list from `path`.
pub fn read_sources(path: &Path) -> Result<Vec<Source>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read sources from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid source list in {}", path.display()))
}

/// Writes `value` as pretty-printed JSON.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize sources")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}
