//! Free-text search term handling.
//!
//! A search string is split into lower-cased alphanumeric terms. Terms are
//! OR-combined: an entity matches when any term appears in any of its
//! indexed fields. PostgreSQL receives the terms as an OR-joined `to_tsquery`
//! expression and applies its own stemming; the in-memory store compares
//! whole terms.

/// Split a search string into lower-cased alphanumeric terms.
///
/// Everything that is not a letter or digit separates terms, so the result
/// never contains tsquery operators.
pub fn search_terms(query: &str) -> Vec<String> {
    query
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Build an OR-combined `to_tsquery` expression from search terms.
///
/// Returns `None` when there are no terms.
pub fn tsquery_any(terms: &[String]) -> Option<String> {
    if terms.is_empty() {
        None
    } else {
        Some(terms.join(" | "))
    }
}

/// True when any term appears as a whole word in any of the fields.
pub fn text_matches(terms: &[String], fields: &[&str]) -> bool {
    if terms.is_empty() {
        return false;
    }
    fields
        .iter()
        .flat_map(|field| search_terms(field))
        .any(|word| terms.contains(&word))
}
