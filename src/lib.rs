//! MCP server for RSS feeds, a curated news source catalog and article text
//! extraction.
//!
//! The core is [`service::NewsService`]; [`mcp`] wraps it in JSON-RPC over
//! HTTP. Feed and article parsing are tolerant pattern matchers that never
//! fail on malformed input; only the network fetch in front of them can.

pub mod catalog;
pub mod config;
pub mod content;
pub mod error;
pub mod feed;
pub mod http;
pub mod mcp;
pub mod service;
pub mod util;
pub mod verify;

pub use catalog::{Catalog, Source};
pub use config::Config;
pub use error::NewsError;
pub use service::NewsService;
