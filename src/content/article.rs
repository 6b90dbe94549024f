use crate::feed::unwrap_cdata;
use crate::http::{FetchError, FetchOptions, HttpFetcher};
use crate::util::strip_tags;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use std::time::Duration;
use url::Url;

/// Default timeout for an article page fetch.
pub const ARTICLE_TIMEOUT: Duration = Duration::from_secs(20);

const MAX_ARTICLE_SIZE: usize = 5 * 1024 * 1024; // 5MB

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

pub const UNTITLED: &str = "Untitled";

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap());

// Meta patterns expect `name`/`property` before `content`, with a non-empty value
static DESCRIPTION_RE: LazyLock<Regex> = LazyLock::new(|| meta_pattern("name", "description"));
static OG_DESCRIPTION_RE: LazyLock<Regex> =
    LazyLock::new(|| meta_pattern("property", "og:description"));
static AUTHOR_RE: LazyLock<Regex> = LazyLock::new(|| meta_pattern("name", "author"));
static ARTICLE_AUTHOR_RE: LazyLock<Regex> =
    LazyLock::new(|| meta_pattern("property", "article:author"));

/// Candidate content regions, most specific first.
static REGION_RES: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        r"(?is)<article[^>]*>(.*?)</article>",
        r"(?is)<main[^>]*>(.*?)</main>",
        r#"(?is)<div[^>]*class=["'][^"']*article[^"']*["'][^>]*>(.*?)</div>"#,
        r#"(?is)<div[^>]*class=["'][^"']*content[^"']*["'][^>]*>(.*?)</div>"#,
    ]
    .map(|pattern| Regex::new(pattern).unwrap())
});

/// Blocks removed together with everything inside them.
static BOILERPLATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)<script.*?</script>|<style.*?</style>|<nav.*?</nav>|<header.*?</header>|<footer.*?</footer>|<aside.*?</aside>",
    )
    .unwrap()
});

fn meta_pattern(attr: &str, value: &str) -> Regex {
    let value = regex::escape(value);
    Regex::new(&format!(
        r#"(?i)<meta[^>]*{attr}=["']{value}["'][^>]*content=["']([^"']+)["']"#
    ))
    .unwrap()
}

/// Readable content extracted from an HTML page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedArticle {
    pub title: String,
    /// Meta description, `""` when absent
    pub excerpt: String,
    /// Meta author, `""` when absent
    pub byline: String,
    /// Cleaned HTML of the main content region
    pub content: String,
    pub text_content: String,
    /// Character count of `text_content`
    pub length: usize,
    /// Page host without a leading `www.`
    pub site_name: String,
}

/// Extracts title, metadata and the main content region of an HTML page.
///
/// Extraction is heuristic and never fails. When no content region is
/// recognised the whole document is used.
///
/// # Examples
///
/// ```
/// use newsfeed_mcp::content::extract_article;
/// use url::Url;
///
/// let url = Url::parse("https://www.example.com/story").unwrap();
/// let article = extract_article(
///     "<title>Story</title><article><p>Body text</p><aside>Ads</aside></article>",
///     &url,
/// );
/// assert_eq!(article.title, "Story");
/// assert_eq!(article.text_content, "Body text");
/// assert_eq!(article.site_name, "example.com");
/// ```
pub fn extract_article(html: &str, page_url: &Url) -> ParsedArticle {
    let title = TITLE_RE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| unwrap_cdata(m.as_str()).trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string());

    let excerpt = first_meta(&[&DESCRIPTION_RE, &OG_DESCRIPTION_RE], html);
    let byline = first_meta(&[&AUTHOR_RE, &ARTICLE_AUTHOR_RE], html);

    let region = REGION_RES
        .iter()
        .find_map(|re| re.captures(html).and_then(|caps| caps.get(1)))
        .map_or(html, |m| m.as_str());

    let content = BOILERPLATE_RE.replace_all(region, "").into_owned();
    let text_content = strip_tags(&content).trim().to_string();
    let length = text_content.chars().count();

    let host = page_url.host_str().unwrap_or_default();
    let site_name = host.strip_prefix("www.").unwrap_or(host).to_string();

    ParsedArticle {
        title,
        excerpt,
        byline,
        content,
        text_content,
        length,
        site_name,
    }
}

fn first_meta(patterns: &[&Regex], html: &str) -> String {
    patterns
        .iter()
        .find_map(|re| re.captures(html).and_then(|caps| caps.get(1)))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Request settings for article pages: browser-like headers, the given
/// timeout and a 5MB body cap.
pub fn article_fetch_options(timeout: Duration, user_agent: &str) -> FetchOptions {
    FetchOptions::new(timeout, MAX_ARTICLE_SIZE)
        .with_header("User-Agent", user_agent)
        .with_header("Accept", ACCEPT_HTML)
}

/// Fetches an already-validated article URL and extracts it.
///
/// # Errors
///
/// Any [`FetchError`] from the request, including non-2xx statuses. Nothing
/// is retried.
pub async fn fetch_article(
    fetcher: &dyn HttpFetcher,
    url: &Url,
    options: &FetchOptions,
) -> Result<ParsedArticle, FetchError> {
    let response = fetcher.fetch(url, options).await?.error_for_status()?;
    let article = extract_article(&response.text(), url);
    tracing::debug!(url = %url, title = %article.title, length = article.length, "Article extracted");
    Ok(article)
}
