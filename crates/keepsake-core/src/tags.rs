//! Tag normalization.
//!
//! Tags are stored trimmed and lower-cased. Duplicates are kept in the order
//! the caller supplied them.

/// Normalize one tag: trim surrounding whitespace and lower-case.
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}

/// Normalize every tag in a list, keeping order and duplicates.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter().map(|t| normalize_tag(t.as_ref())).collect()
}

/// Parse the comma-separated `tags` query parameter into filter values.
///
/// Empty tokens survive the split: `"a,"` yields `["a", ""]` and `""` yields
/// `[""]`. An empty filter value only matches entities that carry an empty tag.
pub fn parse_tag_filter(raw: &str) -> Vec<String> {
    raw.split(',').map(normalize_tag).collect()
}
