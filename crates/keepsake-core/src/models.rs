//! Core data models for keepsake.
//!
//! Notes and bookmarks share one shape: a titled, taggable, favoritable
//! record with store-assigned timestamps. Each kind has a matching draft type
//! that carries a validated, sanitized write payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// =============================================================================
// ENTITY KIND
// =============================================================================

/// The two entity kinds served by keepsake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Note,
    Bookmark,
}

impl EntityKind {
    /// Lower-case singular name ("note"), also used as the SQL table name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Note => "note",
            EntityKind::Bookmark => "bookmark",
        }
    }

    /// Plural collection name used in routes ("notes").
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Note => "notes",
            EntityKind::Bookmark => "bookmarks",
        }
    }

    /// Capitalized name used in client-facing messages ("Note").
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Note => "Note",
            EntityKind::Bookmark => "Bookmark",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// NOTE TYPES
// =============================================================================

/// A short text note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated write payload for a note.
///
/// `tags` and `is_favorite` are optional: on insert a missing value takes the
/// default, on replace it keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub tags: Option<Vec<String>>,
    pub is_favorite: Option<bool>,
}

// =============================================================================
// BOOKMARK TYPES
// =============================================================================

/// A saved URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub is_favorite: bool,
    pub metadata: Option<BookmarkMetadata>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Page metadata captured when a bookmark title was fetched automatically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkMetadata {
    pub fetched_title: Option<String>,
    pub favicon: Option<String>,
    pub description: Option<String>,
}

impl BookmarkMetadata {
    /// Build bookmark metadata from a fetched page.
    pub fn from_page(page: &PageMetadata) -> Self {
        Self {
            fetched_title: page.title.clone(),
            favicon: None,
            description: page.description.clone(),
        }
    }
}

/// Validated write payload for a bookmark.
///
/// On insert `title` must be present and non-empty; the API fills it from
/// the fetched page or the URL before inserting. On replace a missing `title`,
/// `description`, `tags` or `is_favorite` keeps the stored value. `metadata`
/// is only ever set on insert.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookmarkDraft {
    pub title: Option<String>,
    pub url: String,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_favorite: Option<bool>,
    pub metadata: Option<BookmarkMetadata>,
}

// =============================================================================
// ENRICHMENT TYPES
// =============================================================================

/// Title and description extracted from a remote page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl PageMetadata {
    /// True when neither field was found.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}
