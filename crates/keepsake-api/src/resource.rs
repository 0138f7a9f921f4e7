//! Per-kind hooks for the generic handlers.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use keepsake_core::defaults::TITLE_MAX_LEN;
use keepsake_core::validation::truncate_chars;
use keepsake_core::{
    Bookmark, BookmarkDraft, BookmarkMetadata, Entity, EntityRepository, MetadataFetcher, Note,
};

use crate::AppState;

/// An entity kind served under `/api/{collection}`.
#[async_trait]
pub trait Resource: Entity {
    /// The repository for this kind.
    fn repository(state: &AppState) -> &Arc<dyn EntityRepository<Self>>;

    /// Adjust a validated draft before it is inserted.
    async fn prepare_create(_state: &AppState, draft: Self::Draft) -> Self::Draft {
        draft
    }
}

#[async_trait]
impl Resource for Note {
    fn repository(state: &AppState) -> &Arc<dyn EntityRepository<Self>> {
        &state.notes
    }
}

#[async_trait]
impl Resource for Bookmark {
    fn repository(state: &AppState) -> &Arc<dyn EntityRepository<Self>> {
        &state.bookmarks
    }

    async fn prepare_create(state: &AppState, draft: BookmarkDraft) -> BookmarkDraft {
        fill_missing_title(state.fetcher.as_ref(), draft).await
    }
}

/// Give a bookmark without a title one from its page, or from its URL.
///
/// A fetched title also records `metadata`. The URL fallback leaves
/// `metadata` unset.
pub async fn fill_missing_title(
    fetcher: &dyn MetadataFetcher,
    mut draft: BookmarkDraft,
) -> BookmarkDraft {
    if draft.title.as_deref().is_some_and(|t| !t.is_empty()) {
        return draft;
    }

    let page = fetcher
        .fetch_metadata(&draft.url)
        .await
        .filter(|page| page.title.is_some());

    match page {
        Some(page) => {
            let metadata = BookmarkMetadata::from_page(&page);
            draft.title = page.title.map(|t| truncate_chars(&t, TITLE_MAX_LEN));
            draft.metadata = Some(metadata);
        }
        None => {
            debug!(
                subsystem = "api",
                component = "bookmarks",
                op = "title_fallback",
                url = %draft.url,
                "No page title, using URL as title"
            );
            draft.title = Some(truncate_chars(&draft.url, TITLE_MAX_LEN));
        }
    }
    draft
}
