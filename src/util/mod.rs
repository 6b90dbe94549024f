//! Utility functions for common operations.
//!
//! This module provides reusable utilities for:
//!
//! - **URL validation**: parse-and-policy checks run before any fetch
//! - **Text processing**: HTML-to-text conversion, tag stripping and
//!   character-safe truncation
//!
//! # Examples
//!
//! ```
//! use newsfeed_mcp::util::{to_plain_text, truncate_chars, validate_url, NetworkPolicy};
//!
//! let url = validate_url("https://example.com/feed.xml", NetworkPolicy::PublicOnly).unwrap();
//! assert_eq!(url.scheme(), "https");
//!
//! assert_eq!(to_plain_text("<p>Hello <b>world</b></p>"), "Hello world");
//! assert_eq!(truncate_chars("Long article title", 4), "Long");
//! ```

mod text;
mod url_validator;

pub use text::{fallback_plain_text, strip_tags, to_plain_text, truncate_chars};
pub use url_validator::{validate_url, NetworkPolicy, UrlValidationError};
