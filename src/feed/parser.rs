//! Tolerant RSS extraction.
//!
//! No XML parser is involved: each field is an independent "first match wins,
//! else fallback" pattern over the raw text. Output is best-effort and never
//! schema-validated; any input string yields a [`ParsedFeed`].

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Default number of items kept per feed. Downstream rendering assumes at most
/// this many.
pub const MAX_FEED_ITEMS: usize = 10;

pub const UNKNOWN_FEED_TITLE: &str = "Unknown";
pub const NO_TITLE: &str = "No title";
pub const NO_LINK: &str = "#";
pub const UNKNOWN_DATE: &str = "Unknown date";

static ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<item[^>]*>(.*?)</item>").unwrap());
static CDATA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<!\[CDATA\[(.*?)\]\]>").unwrap());

static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| element_pattern("title"));
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| element_pattern("link"));
static PUB_DATE_RE: LazyLock<Regex> = LazyLock::new(|| element_pattern("pubDate"));
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| element_pattern("date"));
static DESCRIPTION_RE: LazyLock<Regex> = LazyLock::new(|| element_pattern("description"));
static CONTENT_ENCODED_RE: LazyLock<Regex> = LazyLock::new(|| element_pattern("content:encoded"));

/// `<tag attrs>body</tag>`, case-insensitive, body may span lines, shortest body wins.
fn element_pattern(tag: &str) -> Regex {
    let tag = regex::escape(tag);
    Regex::new(&format!(r"(?is)<{tag}[^>]*>(.*?)</{tag}>")).unwrap()
}

/// A feed reduced to the fields clients care about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedFeed {
    pub title: String,
    pub items: Vec<FeedItem>,
}

/// One feed entry. Every field is present; missing ones carry a sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    #[serde(rename = "pubDate")]
    pub pub_date: String,
    /// Raw (usually HTML) description, `""` when absent
    pub description: String,
    /// `<content:encoded>` body, or `description` when the item has none
    pub content: String,
}

/// Extracts the feed title and up to [`MAX_FEED_ITEMS`] items.
///
/// # Examples
///
/// ```
/// use newsfeed_mcp::feed::extract_feed;
///
/// let feed = extract_feed("<rss><channel><title>Daily</title>\
///     <item><title><![CDATA[Hello & Co]]></title></item></channel></rss>");
/// assert_eq!(feed.title, "Daily");
/// assert_eq!(feed.items[0].title, "Hello & Co");
/// assert_eq!(feed.items[0].link, "#");
/// ```
pub fn extract_feed(raw_xml: &str) -> ParsedFeed {
    extract_feed_with_limit(raw_xml, MAX_FEED_ITEMS)
}

/// Like [`extract_feed`] with an explicit item cap.
///
/// Items are taken in document order; scanning stops once `limit` items have
/// been found.
pub fn extract_feed_with_limit(raw_xml: &str, limit: usize) -> ParsedFeed {
    let title = first_element(&TITLE_RE, raw_xml)
        .map(|t| unwrap_cdata(&t).trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNKNOWN_FEED_TITLE.to_string());

    let items = ITEM_RE
        .captures_iter(raw_xml)
        .take(limit)
        .filter_map(|caps| caps.get(1))
        .map(|body| extract_item(body.as_str()))
        .collect();

    ParsedFeed { title, items }
}

fn extract_item(item_xml: &str) -> FeedItem {
    let clean = unwrap_cdata(item_xml);

    let title = first_element(&TITLE_RE, &clean).unwrap_or_else(|| NO_TITLE.to_string());
    let link = first_element(&LINK_RE, &clean).unwrap_or_else(|| NO_LINK.to_string());
    let pub_date = first_element(&PUB_DATE_RE, &clean)
        .or_else(|| first_element(&DATE_RE, &clean))
        .unwrap_or_else(|| UNKNOWN_DATE.to_string());
    let description = first_element(&DESCRIPTION_RE, &clean).unwrap_or_default();
    let content =
        first_element(&CONTENT_ENCODED_RE, &clean).unwrap_or_else(|| description.clone());

    FeedItem {
        title,
        link,
        pub_date,
        description,
        content,
    }
}

/// Body of the first match, trimmed. Empty bodies count as absent.
fn first_element(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Replaces every `<![CDATA[...]]>` with its inner text.
pub(crate) fn unwrap_cdata(text: &str) -> std::borrow::Cow<'_, str> {
    CDATA_RE.replace_all(text, "$1")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    const RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:content="http://purl.org/rss/1.0/modules/content/">
<channel>
  <title>Example News</title>
  <link>https://example.com</link>
  <item>
    <title>First story</title>
    <link>https://example.com/1</link>
    <pubDate>Mon, 06 Jan 2025 10:00:00 GMT</pubDate>
    <description>&lt;p&gt;Short&lt;/p&gt;</description>
    <content:encoded><![CDATA[<p>Full <b>body</b></p>]]></content:encoded>
  </item>
  <item>
    <title>Second story</title>
    <link>https://example.com/2</link>
    <description>Only a description</description>
  </item>
</channel>
</rss>"#;

    fn feed_with_items(n: usize) -> String {
        let items: String = (0..n)
            .map(|i| format!("<item><title>Item {i}</title><link>https://e.com/{i}</link></item>"))
            .collect();
        format!("<rss><channel><title>Many</title>{items}</channel></rss>")
    }

    #[test]
    fn test_extracts_title_and_items() {
        let feed = extract_feed(RSS);
        assert_eq!(feed.title, "Example News");
        assert_eq!(feed.items.len(), 2);

        let first = &feed.items[0];
        assert_eq!(first.title, "First story");
        assert_eq!(first.link, "https://example.com/1");
        assert_eq!(first.pub_date, "Mon, 06 Jan 2025 10:00:00 GMT");
        assert_eq!(first.description, "&lt;p&gt;Short&lt;/p&gt;");
        assert_eq!(first.content, "<p>Full <b>body</b></p>");
    }

    #[test]
    fn test_content_falls_back_to_description() {
        let feed = extract_feed(RSS);
        let second = &feed.items[1];
        assert_eq!(second.content, "Only a description");
        assert_eq!(second.content, second.description);
        assert_eq!(second.pub_date, UNKNOWN_DATE);
    }

    #[test]
    fn test_cdata_unwrapped() {
        let xml = "<rss><item><title><![CDATA[Hello & Co]]></title></item></rss>";
        let feed = extract_feed(xml);
        assert_eq!(feed.items[0].title, "Hello & Co");
    }

    #[test]
    fn test_multiline_cdata_unwrapped() {
        let xml = "<item><description><![CDATA[line one\nline two]]></description></item>";
        let feed = extract_feed(xml);
        assert_eq!(feed.items[0].description, "line one\nline two");
    }

    #[test]
    fn test_sentinels_for_missing_fields() {
        let feed = extract_feed("<rss><item></item></rss>");
        assert_eq!(
            feed.items,
            vec![FeedItem {
                title: NO_TITLE.to_string(),
                link: NO_LINK.to_string(),
                pub_date: UNKNOWN_DATE.to_string(),
                description: String::new(),
                content: String::new(),
            }]
        );
    }

    #[test]
    fn test_whitespace_only_fields_use_sentinels() {
        let feed = extract_feed("<item><title>   </title><link>\n</link></item>");
        assert_eq!(feed.items[0].title, NO_TITLE);
        assert_eq!(feed.items[0].link, NO_LINK);
    }

    #[test]
    fn test_date_used_when_pubdate_missing() {
        let feed = extract_feed("<item><date>2025-01-06T10:00:00Z</date></item>");
        assert_eq!(feed.items[0].pub_date, "2025-01-06T10:00:00Z");
    }

    #[test]
    fn test_fields_are_trimmed() {
        let feed = extract_feed("<item><title>\n   Padded  \n</title></item>");
        assert_eq!(feed.items[0].title, "Padded");
    }

    #[test]
    fn test_case_insensitive_tags_and_attributes() {
        let xml = r#"<RSS><CHANNEL><TITLE>Loud</TITLE><ITEM id="1"><Title type="text">Mixed</Title></ITEM></CHANNEL></RSS>"#;
        let feed = extract_feed(xml);
        assert_eq!(feed.title, "Loud");
        assert_eq!(feed.items[0].title, "Mixed");
    }

    #[test]
    fn test_caps_at_ten_items_in_document_order() {
        let feed = extract_feed(&feed_with_items(15));
        assert_eq!(feed.items.len(), MAX_FEED_ITEMS);
        for (i, item) in feed.items.iter().enumerate() {
            assert_eq!(item.title, format!("Item {i}"));
        }
    }

    #[test]
    fn test_custom_limit() {
        assert_eq!(extract_feed_with_limit(&feed_with_items(15), 3).items.len(), 3);
        assert!(extract_feed_with_limit(&feed_with_items(15), 0).items.is_empty());
    }

    #[test]
    fn test_no_items_yields_empty_list() {
        let feed = extract_feed("<html><head><title>Not a feed</title></head></html>");
        assert_eq!(feed.title, "Not a feed");
        assert!(feed.items.is_empty());
    }

    #[test]
    fn test_missing_title_is_unknown() {
        let feed = extract_feed("garbage <<< >>> no tags at all");
        assert_eq!(feed.title, UNKNOWN_FEED_TITLE);
        assert!(feed.items.is_empty());
    }

    #[test]
    fn test_cdata_feed_title() {
        let feed = extract_feed("<channel><title><![CDATA[ Wrapped ]]></title></channel>");
        assert_eq!(feed.title, "Wrapped");
    }

    #[test]
    fn test_unclosed_item_ignored() {
        let feed = extract_feed("<item><title>Open</title>");
        assert!(feed.items.is_empty());
    }

    proptest! {
        #[test]
        fn prop_never_panics_on_arbitrary_input(s in ".*") {
            let _ = extract_feed(&s);
        }

        #[test]
        fn prop_input_without_item_tags_has_no_items(s in "[^<]*(<[a-hj-z][^<>]*>[^<]*)*") {
            // Generated tags never start with 'i', so no <item> can appear
            let feed = extract_feed(&s);
            prop_assert!(feed.items.is_empty());
        }

        #[test]
        fn prop_never_more_than_cap(n in 0usize..30) {
            let feed = extract_feed(&feed_with_items(n));
            prop_assert_eq!(feed.items.len(), n.min(MAX_FEED_ITEMS));
        }
    }
}
