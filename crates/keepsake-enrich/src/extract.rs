//! Metadata extraction from raw HTML.

use once_cell::sync::Lazy;
use regex::Regex;

use keepsake_core::PageMetadata;

/// Pulls page metadata out of a response body.
pub trait MetadataExtractor: Send + Sync {
    fn extract(&self, html: &str) -> PageMetadata;
}

static TITLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<title>(.*?)</title>").expect("title pattern is valid")
});

static DESCRIPTION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)<meta[^>]*name=["']description["'][^>]*content=["']([^"']*)["'][^>]*>"#,
    )
    .expect("description pattern is valid")
});

/// Pattern-based extractor.
///
/// Takes the first `<title>` on a single line and the first
/// `<meta name="description" content="...">` whose `name` precedes `content`.
/// No entity decoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternExtractor;

impl PatternExtractor {
    fn capture(pattern: &Regex, html: &str) -> Option<String> {
        pattern
            .captures(html)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

impl MetadataExtractor for PatternExtractor {
    fn extract(&self, html: &str) -> PageMetadata {
        PageMetadata {
            title: Self::capture(&TITLE_PATTERN, html),
            description: Self::capture(&DESCRIPTION_PATTERN, html),
        }
    }
}
