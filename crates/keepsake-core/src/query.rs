//! List query construction.
//!
//! [`EntityQuery`] is built from the three optional list parameters
//! (`q`, `tags`, `favorite`) and handed to a store, which evaluates it with
//! its native predicates. Present predicates combine with AND. Results are
//! ordered newest first and capped at [`RESULT_CAP`].

use serde::Serialize;

use crate::defaults::{FAVORITE_FILTER_VALUE, RESULT_CAP};
use crate::search::{search_terms, text_matches};
use crate::tags::parse_tag_filter;
use crate::traits::Entity;

/// A store query over one entity kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityQuery {
    /// Raw free-text query, set only when `q` was present and non-empty.
    pub text: Option<String>,
    /// OR-combined search terms derived from `text`.
    pub terms: Vec<String>,
    /// Tag filter values; an entity matches if it carries any of them.
    pub tags: Option<Vec<String>>,
    /// Restrict to favorites.
    pub favorites_only: bool,
    /// Maximum number of results.
    pub limit: usize,
}

impl Default for EntityQuery {
    fn default() -> Self {
        Self {
            text: None,
            terms: Vec::new(),
            tags: None,
            favorites_only: false,
            limit: RESULT_CAP,
        }
    }
}

impl EntityQuery {
    /// Build a query from raw list parameters.
    ///
    /// - `q`: applied when present and non-empty.
    /// - `tags`: applied when present and non-empty; comma-separated, each
    ///   token trimmed and lower-cased.
    /// - `favorite`: only the exact string `"true"` restricts results.
    pub fn from_params(q: Option<&str>, tags: Option<&str>, favorite: Option<&str>) -> Self {
        let text = q.filter(|q| !q.is_empty()).map(str::to_string);
        let terms = text.as_deref().map(search_terms).unwrap_or_default();

        Self {
            text,
            terms,
            tags: tags.filter(|t| !t.is_empty()).map(parse_tag_filter),
            favorites_only: favorite == Some(FAVORITE_FILTER_VALUE),
            limit: RESULT_CAP,
        }
    }

    /// True when no predicate applies.
    pub fn is_unfiltered(&self) -> bool {
        self.text.is_none() && self.tags.is_none() && !self.favorites_only
    }

    /// Evaluate the query predicates against one entity.
    ///
    /// Used by stores without native query support. Ordering and the result
    /// cap are the caller's responsibility.
    pub fn matches<E: Entity>(&self, entity: &E) -> bool {
        if self.text.is_some() && !text_matches(&self.terms, &entity.search_fields()) {
            return false;
        }
        if let Some(filter) = &self.tags {
            if !entity.tags().iter().any(|t| filter.contains(t)) {
                return false;
            }
        }
        if self.favorites_only && !entity.is_favorite() {
            return false;
        }
        true
    }
}
