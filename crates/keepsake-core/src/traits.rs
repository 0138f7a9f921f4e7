//! Core traits for keepsake abstractions.
//!
//! These traits define the interfaces that concrete implementations
//! must satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::*;
use crate::query::EntityQuery;
use crate::validation::{FieldRule, ValidatedFields, BOOKMARK_RULES, NOTE_RULES};

// =============================================================================
// ENTITY TRAIT
// =============================================================================

/// A taggable, favoritable, searchable record.
///
/// Implemented by [`Note`] and [`Bookmark`]. Stores and HTTP handlers are
/// written once against this trait.
pub trait Entity: Clone + Serialize + Send + Sync + 'static {
    /// Validated write payload for this kind.
    type Draft: Clone + Send + Sync + 'static;

    /// Which kind this is.
    const KIND: EntityKind;

    /// Validation descriptor for create and update payloads.
    const RULES: &'static [FieldRule];

    fn id(&self) -> Uuid;
    fn tags(&self) -> &[String];
    fn is_favorite(&self) -> bool;
    fn created_at(&self) -> DateTime<Utc>;

    /// Values of the fields covered by free-text search.
    fn search_fields(&self) -> Vec<&str>;

    /// Build a draft from fields that passed [`Self::RULES`].
    fn draft_from_fields(fields: ValidatedFields) -> Self::Draft;

    /// Build a new entity from a draft.
    fn from_draft(id: Uuid, draft: Self::Draft, now: DateTime<Utc>) -> Result<Self>;

    /// Replace the entity's fields with the draft's.
    fn apply_draft(&mut self, draft: Self::Draft, now: DateTime<Utc>);
}

impl Entity for Note {
    type Draft = NoteDraft;
    const KIND: EntityKind = EntityKind::Note;
    const RULES: &'static [FieldRule] = NOTE_RULES;

    fn id(&self) -> Uuid {
        self.id
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.content.as_str()];
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }

    fn draft_from_fields(mut fields: ValidatedFields) -> NoteDraft {
        NoteDraft {
            title: fields.take_text("title").unwrap_or_default(),
            content: fields.take_text("content").unwrap_or_default(),
            tags: fields.take_tags("tags"),
            is_favorite: fields.take_flag("isFavorite"),
        }
    }

    fn from_draft(id: Uuid, draft: NoteDraft, now: DateTime<Utc>) -> Result<Self> {
        if draft.title.is_empty() || draft.content.is_empty() {
            return Err(Error::InvalidInput(
                "Note title and content are required".to_string(),
            ));
        }
        Ok(Note {
            id,
            title: draft.title,
            content: draft.content,
            tags: draft.tags.unwrap_or_default(),
            is_favorite: draft.is_favorite.unwrap_or(false),
            created_at: now,
            updated_at: now,
        })
    }

    fn apply_draft(&mut self, draft: NoteDraft, now: DateTime<Utc>) {
        self.title = draft.title;
        self.content = draft.content;
        if let Some(tags) = draft.tags {
            self.tags = tags;
        }
        if let Some(is_favorite) = draft.is_favorite {
            self.is_favorite = is_favorite;
        }
        self.updated_at = now;
    }
}

impl Entity for Bookmark {
    type Draft = BookmarkDraft;
    const KIND: EntityKind = EntityKind::Bookmark;
    const RULES: &'static [FieldRule] = BOOKMARK_RULES;

    fn id(&self) -> Uuid {
        self.id
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.url.as_str()];
        if let Some(description) = &self.description {
            fields.push(description.as_str());
        }
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }

    fn draft_from_fields(mut fields: ValidatedFields) -> BookmarkDraft {
        BookmarkDraft {
            title: fields.take_text("title").filter(|t| !t.is_empty()),
            url: fields.take_text("url").unwrap_or_default(),
            description: fields.take_text("description"),
            tags: fields.take_tags("tags"),
            is_favorite: fields.take_flag("isFavorite"),
            metadata: None,
        }
    }

    fn from_draft(id: Uuid, draft: BookmarkDraft, now: DateTime<Utc>) -> Result<Self> {
        let title = draft
            .title
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::InvalidInput("Bookmark title is required".to_string()))?;
        Ok(Bookmark {
            id,
            title,
            url: draft.url,
            description: draft.description,
            tags: draft.tags.unwrap_or_default(),
            is_favorite: draft.is_favorite.unwrap_or(false),
            metadata: draft.metadata,
            created_at: now,
            updated_at: now,
        })
    }

    fn apply_draft(&mut self, draft: BookmarkDraft, now: DateTime<Utc>) {
        if let Some(title) = draft.title.filter(|t| !t.is_empty()) {
            self.title = title;
        }
        self.url = draft.url;
        if let Some(description) = draft.description {
            self.description = Some(description);
        }
        if let Some(tags) = draft.tags {
            self.tags = tags;
        }
        if let Some(is_favorite) = draft.is_favorite {
            self.is_favorite = is_favorite;
        }
        self.updated_at = now;
    }
}

// =============================================================================
// REPOSITORY TRAITS
// =============================================================================

/// Repository for one entity kind.
///
/// Every operation is a single store statement. Concurrent writes to the
/// same entity are last-write-wins.
#[async_trait]
pub trait EntityRepository<E: Entity>: Send + Sync {
    /// Validate-free insert of an already validated draft.
    async fn insert(&self, draft: E::Draft) -> Result<E>;

    /// Fetch one entity. Returns [`Error::NotFound`] if the id is unknown.
    async fn fetch(&self, id: Uuid) -> Result<E>;

    /// Run a list query: filtered, newest first, at most `query.limit` items.
    async fn find(&self, query: &EntityQuery) -> Result<Vec<E>>;

    /// Replace an entity's fields. Returns [`Error::NotFound`] if the id is unknown.
    async fn replace(&self, id: Uuid, draft: E::Draft) -> Result<E>;

    /// Delete an entity. Returns [`Error::NotFound`] if the id is unknown,
    /// so a second delete of the same id fails.
    async fn delete(&self, id: Uuid) -> Result<()>;
}

// =============================================================================
// ENRICHMENT TRAITS
// =============================================================================

/// Best-effort page metadata lookup for bookmarks.
///
/// Implementations never fail: any problem reaching or reading the page is
/// logged and reported as `None`.
#[async_trait]
pub trait MetadataFetcher: Send + Sync {
    async fn fetch_metadata(&self, url: &str) -> Option<PageMetadata>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate;
    use serde_json::json;

    #[test]
    fn test_note_draft_from_fields() {
        let fields = validate(
            Note::RULES,
            &json!({"title": " Hi ", "content": "there", "tags": ["A"]}),
        )
        .unwrap();
        let draft = Note::draft_from_fields(fields);
        assert_eq!(draft.title, "Hi");
        assert_eq!(draft.content, "there");
        assert_eq!(draft.tags, Some(vec!["a".to_string()]));
        assert_eq!(draft.is_favorite, None);
    }

    #[test]
    fn test_note_from_draft_defaults() {
        let now = Utc::now();
        let draft = NoteDraft {
            title: "t".to_string(),
            content: "c".to_string(),
            ..Default::default()
        };
        let note = Note::from_draft(Uuid::nil(), draft, now).unwrap();
        assert!(note.tags.is_empty());
        assert!(!note.is_favorite);
        assert_eq!(note.created_at, now);
        assert_eq!(note.updated_at, now);
    }

    #[test]
    fn test_note_apply_draft_keeps_omitted_optionals() {
        let now = Utc::now();
        let mut note = Note::from_draft(
            Uuid::nil(),
            NoteDraft {
                title: "t".to_string(),
                content: "c".to_string(),
                tags: Some(vec!["keep".to_string()]),
                is_favorite: Some(true),
            },
            now,
        )
        .unwrap();

        note.apply_draft(
            NoteDraft {
                title: "t2".to_string(),
                content: "c2".to_string(),
                tags: None,
                is_favorite: None,
            },
            Utc::now(),
        );
        assert_eq!(note.title, "t2");
        assert_eq!(note.tags, vec!["keep"]);
        assert!(note.is_favorite);
        assert_eq!(note.created_at, now);
    }

    #[test]
    fn test_bookmark_from_draft_requires_title() {
        let draft = BookmarkDraft {
            url: "example.com".to_string(),
            ..Default::default()
        };
        let err = Bookmark::from_draft(Uuid::nil(), draft, Utc::now()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_bookmark_draft_drops_empty_title() {
        let fields = validate(Bookmark::RULES, &json!({"url": "example.com", "title": ""})).unwrap();
        assert!(Bookmark::draft_from_fields(fields).title.is_none());
    }

    #[test]
    fn test_bookmark_apply_draft_keeps_title_and_metadata() {
        let mut bookmark = Bookmark::from_draft(
            Uuid::nil(),
            BookmarkDraft {
                title: Some("Example".to_string()),
                url: "example.com".to_string(),
                metadata: Some(BookmarkMetadata {
                    fetched_title: Some("Example".to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            },
            Utc::now(),
        )
        .unwrap();

        bookmark.apply_draft(
            BookmarkDraft {
                url: "example.org".to_string(),
                is_favorite: Some(true),
                ..Default::default()
            },
            Utc::now(),
        );
        assert_eq!(bookmark.title, "Example");
        assert_eq!(bookmark.url, "example.org");
        assert!(bookmark.is_favorite);
        assert!(bookmark.metadata.is_some());
    }

    #[test]
    fn test_bookmark_search_fields_include_url_and_description() {
        let bookmark = Bookmark::from_draft(
            Uuid::nil(),
            BookmarkDraft {
                title: Some("T".to_string()),
                url: "rust-lang.org".to_string(),
                description: Some("Systems language".to_string()),
                tags: Some(vec!["lang".to_string()]),
                ..Default::default()
            },
            Utc::now(),
        )
        .unwrap();
        let fields = bookmark.search_fields();
        assert!(fields.contains(&"rust-lang.org"));
        assert!(fields.contains(&"Systems language"));
        assert!(fields.contains(&"lang"));
    }
}
