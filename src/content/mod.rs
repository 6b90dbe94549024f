//! Article page retrieval and readable-content extraction.
//!
//! Extraction is pattern-based over the raw HTML: metadata comes from
//! `<title>` and `<meta>` tags, the body from the first recognised content
//! region with navigation and other page chrome removed.

mod article;

pub use article::{
    article_fetch_options, extract_article, fetch_article, ParsedArticle, ARTICLE_TIMEOUT,
    UNTITLED,
};
