//! RSS/Atom feed extraction and fetching.
//!
//! - [`parser`] - Tolerant, regex-based feed extraction
//! - [`fetcher`] - Single-feed fetches and the concurrent per-category fan-out
//!
//! # Example
//!
//! ```ignore
//! use newsfeed_mcp::feed::{fetch_category, FetchOutcome};
//!
//! let reports = fetch_category(&fetcher, &sources, 5, 5, &settings).await;
//! for report in reports {
//!     if let FetchOutcome::Failure { message } = report.outcome {
//!         eprintln!("{}: {}", report.source, message);
//!     }
//! }
//! ```

mod fetcher;
mod parser;

pub use fetcher::{
    fetch_category, fetch_feed, fetch_source, FeedSettings, FetchOutcome, SourceReport,
};
pub(crate) use parser::unwrap_cdata;
pub use parser::{
    extract_feed, extract_feed_with_limit, FeedItem, ParsedFeed, MAX_FEED_ITEMS, NO_LINK,
    NO_TITLE, UNKNOWN_DATE, UNKNOWN_FEED_TITLE,
};
