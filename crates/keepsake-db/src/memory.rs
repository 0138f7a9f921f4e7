//! In-memory repository.
//!
//! Backs the API when `KEEPSAKE_STORE=memory` and in tests. Query predicates
//! are evaluated with [`EntityQuery::matches`], so text search compares whole
//! lower-cased terms without stemming.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use keepsake_core::{new_v7, Entity, EntityQuery, EntityRepository, Error, Result};

struct Stored<E> {
    seq: u64,
    entity: E,
}

struct MemoryState<E> {
    entries: HashMap<Uuid, Stored<E>>,
    next_seq: u64,
}

/// A map of entities behind an async lock.
///
/// Each insert takes the next sequence number; lists are ordered by it,
/// newest first.
pub struct MemoryRepository<E: Entity> {
    state: Arc<RwLock<MemoryState<E>>>,
}

impl<E: Entity> Clone for MemoryRepository<E> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<E: Entity> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> MemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(MemoryState {
                entries: HashMap::new(),
                next_seq: 0,
            })),
        }
    }

    /// Number of stored entities.
    pub async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl<E: Entity> EntityRepository<E> for MemoryRepository<E> {
    async fn insert(&self, draft: E::Draft) -> Result<E> {
        let entity = E::from_draft(new_v7(), draft, Utc::now())?;
        let mut state = self.state.write().await;
        let seq = state.next_seq;
        state.next_seq += 1;
        state.entries.insert(
            entity.id(),
            Stored {
                seq,
                entity: entity.clone(),
            },
        );
        Ok(entity)
    }

    async fn fetch(&self, id: Uuid) -> Result<E> {
        self.state
            .read()
            .await
            .entries
            .get(&id)
            .map(|stored| stored.entity.clone())
            .ok_or(Error::NotFound(E::KIND, id))
    }

    async fn find(&self, query: &EntityQuery) -> Result<Vec<E>> {
        let state = self.state.read().await;
        let mut matched: Vec<&Stored<E>> = state
            .entries
            .values()
            .filter(|stored| query.matches(&stored.entity))
            .collect();
        matched.sort_by(|a, b| b.seq.cmp(&a.seq));
        Ok(matched
            .into_iter()
            .take(query.limit)
            .map(|stored| stored.entity.clone())
            .collect())
    }

    async fn replace(&self, id: Uuid, draft: E::Draft) -> Result<E> {
        let mut state = self.state.write().await;
        let stored = state
            .entries
            .get_mut(&id)
            .ok_or(Error::NotFound(E::KIND, id))?;
        stored.entity.apply_draft(draft, Utc::now());
        Ok(stored.entity.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.state
            .write()
            .await
            .entries
            .remove(&id)
            .map(|_| ())
            .ok_or(Error::NotFound(E::KIND, id))
    }
}
