//! HTML-fragment extraction collaborator.
//!
//! Turns a raw response document into a [`PageContent`]: the `<title>` text
//! and the inner markup of the content container. The shipping
//! [`FragmentExtractor`] is regex-based string surgery, which is all the
//! engine needs from this seam; hosts with a real DOM can substitute their
//! own implementation.

use crate::cache::PageContent;
use once_cell::sync::Lazy;
use regex::Regex;

/// Extraction collaborator: raw response text plus a selector in, page
/// content out.
///
/// The contract is a fallback chain: the inner markup of the first element
/// matching the selector, else the document's `<body>` inner markup, else
/// the raw text verbatim. The title is always the `<title>` text when
/// present, empty otherwise.
pub trait HtmlExtractor: Send + Sync {
    fn extract(&self, raw: &str, selector: &str) -> PageContent;
}

static TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("title regex")
});

static BODY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<body[^>]*>(.*)</body>").expect("body regex")
});

/// Regex-based [`HtmlExtractor`].
///
/// Understands `#id` selectors; any other selector form falls straight
/// through to the `<body>` fallback.
#[derive(Debug, Clone, Default)]
pub struct FragmentExtractor;

impl FragmentExtractor {
    pub fn new() -> Self {
        Self
    }

    fn by_id(&self, raw: &str, id: &str) -> Option<String> {
        let pattern = format!(
            r#"(?is)<(\w+)[^>]*\bid\s*=\s*["']?{}["']?(?:\s[^>]*)?>"#,
            regex::escape(id)
        );
        let re = Regex::new(&pattern).ok()?;
        let caps = re.captures(raw)?;
        let tag = caps.get(1)?.as_str().to_ascii_lowercase();
        let inner_start = caps.get(0)?.end();

        // First matching close tag; nested same-name tags inside the
        // container are beyond what this plumbing needs to handle.
        let close = format!("</{tag}>");
        let inner_end = raw[inner_start..].to_ascii_lowercase().find(&close)?;
        Some(raw[inner_start..inner_start + inner_end].to_string())
    }
}

impl HtmlExtractor for FragmentExtractor {
    fn extract(&self, raw: &str, selector: &str) -> PageContent {
        let title = TITLE_RE
            .captures(raw)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();

        let body = selector
            .strip_prefix('#')
            .and_then(|id| self.by_id(raw, id))
            .or_else(|| {
                BODY_RE
                    .captures(raw)
                    .and_then(|c| c.get(1))
                    .map(|m| m.as_str().to_string())
            })
            .unwrap_or_else(|| raw.to_string());

        PageContent { title, body }
    }
}
