use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Matches any markup tag. Used by the degraded plain-text path and for
/// quick summaries.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Markup that renders as nothing in plain text: link wrappers (the link text
/// itself is kept), images and horizontal rules.
#[cfg(feature = "html2text")]
static UNRENDERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?a\b[^>]*>|<img\b[^>]*>|<hr\b[^>]*>").unwrap());

/// Line width handed to html2text; unbounded so paragraphs never wrap.
#[cfg(feature = "html2text")]
const NO_WRAP_WIDTH: usize = usize::MAX;

/// Converts an HTML fragment (feed description, encoded content) to plain text.
///
/// Rendering is fixed: no line wrapping, links render as their text only and
/// images render as nothing.
///
/// The conversion uses `html2text` when the `html2text` feature is enabled.
/// If the feature is off or the conversion fails, the degraded path from
/// [`fallback_plain_text`] runs instead. Callers cannot tell which path ran.
///
/// # Examples
///
/// ```
/// use newsfeed_mcp::util::to_plain_text;
///
/// assert_eq!(to_plain_text("<b>Bold</b> &amp; text"), "Bold & text");
/// ```
pub fn to_plain_text(html: &str) -> String {
    #[cfg(feature = "html2text")]
    {
        if let Some(text) = convert_with_html2text(html) {
            return text;
        }
    }

    fallback_plain_text(html)
}

#[cfg(feature = "html2text")]
fn convert_with_html2text(html: &str) -> Option<String> {
    let prepared = UNRENDERED_RE.replace_all(html, "");
    match html2text::from_read_with_decorator(
        prepared.as_bytes(),
        NO_WRAP_WIDTH,
        html2text::render::TrivialDecorator::new(),
    ) {
        Ok(text) => Some(text.trim().to_string()),
        Err(e) => {
            tracing::debug!(error = %e, "html2text conversion failed, using tag stripping");
            None
        }
    }
}

/// Degraded HTML-to-text conversion.
///
/// Strips every tag, unescapes `&nbsp;`, `&amp;`, `&lt;`, `&gt;`, `&quot;`
/// and `&#39;` (in that order), then trims.
pub fn fallback_plain_text(html: &str) -> String {
    TAG_RE
        .replace_all(html, "")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .trim()
        .to_string()
}

/// Removes markup tags without touching entities or whitespace.
///
/// Returns `Cow::Borrowed` when the input has no tags.
pub fn strip_tags(html: &str) -> Cow<'_, str> {
    TAG_RE.replace_all(html, "")
}

/// Truncates a string to at most `max_chars` Unicode scalar values.
///
/// Never splits a multi-byte character. Returns `Cow::Borrowed` when the
/// string already fits.
pub fn truncate_chars(s: &str, max_chars: usize) -> Cow<'_, str> {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => Cow::Owned(s[..byte_idx].to_string()),
        None => Cow::Borrowed(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_bold_and_entity() {
        assert_eq!(to_plain_text("<b>Bold</b> &amp; text"), "Bold & text");
    }

    #[test]
    fn test_fallback_bold_and_entity() {
        assert_eq!(fallback_plain_text("<b>Bold</b> &amp; text"), "Bold & text");
    }

    #[test]
    fn test_fallback_unescapes_all_named_entities() {
        let input = "&lt;tag&gt;&nbsp;&quot;quoted&quot; &#39;single&#39;";
        assert_eq!(fallback_plain_text(input), "<tag> \"quoted\" 'single'");
    }

    #[test]
    fn test_fallback_trims() {
        assert_eq!(fallback_plain_text("  <p> spaced </p>\n"), "spaced");
    }

    #[test]
    fn test_links_render_as_text_only() {
        let text = to_plain_text(r#"Read <a href="https://example.com/story">the story</a> now"#);
        assert!(text.contains("the story"));
        assert!(!text.contains("https://example.com/story"));
        assert!(!text.contains('['));
    }

    #[test]
    fn test_images_render_as_nothing() {
        let text = to_plain_text(r#"<p>Before<img src="x.png" alt="ALT TEXT">After</p>"#);
        assert!(!text.contains("ALT TEXT"));
        assert!(!text.contains("x.png"));
        assert!(text.contains("Before"));
        assert!(text.contains("After"));
    }

    #[test]
    fn test_plain_text_of_plain_input() {
        assert_eq!(to_plain_text("Just words"), "Just words");
        assert_eq!(to_plain_text(""), "");
    }

    #[test]
    fn test_long_paragraph_not_wrapped() {
        let words = vec!["word"; 200].join(" ");
        let text = to_plain_text(&format!("<p>{}</p>", words));
        assert!(!text.contains('\n'));
    }

    #[test]
    fn test_very_long_paragraph_not_wrapped() {
        // 25,000 characters, well past any fixed wrap width
        let words = vec!["word"; 5000].join(" ");
        let text = to_plain_text(&format!("<p>{}</p>", words));
        assert_eq!(text.lines().count(), 1);
        assert_eq!(text, words);
    }

    #[test]
    fn test_strip_tags_borrowed_when_clean() {
        let result = strip_tags("no markup here");
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(strip_tags("<p>a <i>b</i></p>"), "a b");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("Hello World", 5), "Hello");
        assert_eq!(truncate_chars("Short", 10), "Short");
        assert!(matches!(truncate_chars("Short", 5), Cow::Borrowed(_)));
        assert_eq!(truncate_chars("Anything", 0), "");
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        // Each CJK character is three bytes; truncation counts characters
        assert_eq!(truncate_chars("日本語テスト", 3), "日本語");
        assert_eq!(truncate_chars("héllo", 2), "hé");
    }
}
