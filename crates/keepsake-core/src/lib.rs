//! # keepsake-core
//!
//! Core types, traits, and query construction for the keepsake notes and
//! bookmarks service.
//!
//! This crate provides the entity models shared by every other keepsake crate,
//! the [`EntityQuery`] builder that turns filter parameters into a store
//! query, request validation descriptors, and the repository and metadata
//! fetcher traits that the storage and enrichment crates implement.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod query;
pub mod search;
pub mod tags;
pub mod traits;
pub mod uuid_utils;
pub mod validation;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use query::EntityQuery;
pub use search::{search_terms, tsquery_any};
pub use tags::{normalize_tag, normalize_tags, parse_tag_filter};
pub use traits::*;
pub use uuid_utils::new_v7;
pub use validation::{
    validate, FieldError, FieldKind, FieldRule, ValidatedFields, BOOKMARK_RULES, NOTE_RULES,
};
