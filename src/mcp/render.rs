//! Markdown rendering of tool results.
//!
//! The output is meant for an LLM client to read, so the layout favours a
//! predictable shape over prettiness.

use crate::content::ParsedArticle;
use crate::feed::{FetchOutcome, ParsedFeed};
use crate::service::{CategoryReport, SourceFeed, SourceListing};
use crate::util::{strip_tags, to_plain_text, truncate_chars};
use serde::Serialize;
use std::fmt::Write;

/// Characters of tag-stripped description shown per category item.
const CATEGORY_SUMMARY_CHARS: usize = 150;

pub fn feed(feed: &ParsedFeed) -> String {
    let mut out = format!("# Feed: {}\n\n", feed.title);

    for (i, item) in feed.items.iter().enumerate() {
        let summary_html = if item.description.is_empty() {
            &item.content
        } else {
            &item.description
        };
        let summary = to_plain_text(summary_html);

        let _ = writeln!(out, "## Entry {}", i + 1);
        let _ = writeln!(out, "- **Title**: {}", item.title);
        let _ = writeln!(out, "- **Link**: [{0}]({0})", item.link);
        let _ = writeln!(out, "- **Published**: {}", item.pub_date);
        if !summary.is_empty() {
            let _ = writeln!(out, "- **Summary**: {}", summary);
        }
        out.push('\n');
    }

    out
}

pub fn source_listing(listing: &SourceListing) -> String {
    let mut out = String::from("# Available News Sources");
    if let Some(category) = &listing.category {
        let _ = write!(out, " (Category: {})", category);
    }
    let _ = write!(out, "\n\nTotal: {} sources\n\n", listing.sources.len());

    let entries: Vec<String> = listing
        .sources
        .iter()
        .enumerate()
        .map(|(i, source)| {
            format!(
                "{}. **{}**\n   - Category: {}\n   - Language: {}\n   - URL: {}\n   - Verified: {}\n",
                i + 1,
                source.name,
                source.category,
                source.language,
                source.url,
                if source.verified { "✅" } else { "❌" }
            )
        })
        .collect();
    out.push_str(&entries.join("\n"));

    let categories = if listing.categories.is_empty() {
        "N/A".to_string()
    } else {
        listing.categories.join(", ")
    };
    let _ = write!(out, "\n\nAvailable categories: {}", categories);
    out
}

pub fn category(report: &CategoryReport) -> String {
    let mut out = format!("# News from Category: {}\n\n", report.category);
    let _ = write!(out, "Sources checked: {}\n\n", report.sources_checked);

    for entry in &report.outcomes {
        let _ = writeln!(out, "## {}", entry.source);
        match &entry.outcome {
            FetchOutcome::Success { items } if !items.is_empty() => {
                out.push('\n');
                for (j, item) in items.iter().enumerate() {
                    let _ = writeln!(out, "{}. **{}**", j + 1, item.title);
                    let _ = writeln!(out, "   - Link: [{0}]({0})", item.link);
                    let _ = writeln!(out, "   - Published: {}", item.pub_date);
                    if !item.description.is_empty() {
                        let stripped = strip_tags(&item.description);
                        let summary = truncate_chars(&stripped, CATEGORY_SUMMARY_CHARS);
                        let _ = writeln!(out, "   - Summary: {}...", summary);
                    }
                    out.push('\n');
                }
                out.push('\n');
            }
            FetchOutcome::Success { .. } => {
                out.push_str("No items found\n\n");
            }
            FetchOutcome::Failure { message } => {
                let _ = write!(out, "❌ Failed: {}\n\n", message);
            }
        }
    }

    out
}

pub fn source_feed(result: &SourceFeed) -> String {
    let source = &result.source;
    let mut out = format!("# {}\n\n", source.name);
    let _ = write!(
        out,
        "Category: {} | Language: {}\n\n",
        source.category, source.language
    );

    for (i, item) in result.feed.items.iter().enumerate() {
        let _ = write!(out, "## {}. {}\n\n", i + 1, item.title);
        let _ = writeln!(out, "- **Link**: [{0}]({0})", item.link);
        let _ = writeln!(out, "- **Published**: {}", item.pub_date);
        if !item.description.is_empty() {
            let _ = writeln!(out, "- **Summary**: {}", strip_tags(&item.description).trim());
        }
        out.push('\n');
    }

    out
}

#[derive(Serialize)]
struct ArticlePayload<'a> {
    success: bool,
    #[serde(flatten)]
    article: &'a ParsedArticle,
}

/// Article as a JSON document with a leading `"success": true`.
pub fn article(article: &ParsedArticle) -> Result<String, serde_json::Error> {
    serde_json::to_string(&ArticlePayload {
        success: true,
        article,
    })
}
