//! UUID v7 utilities for time-ordered identifiers.
//!
//! Entity ids are UUIDv7, which embed a millisecond Unix timestamp in their
//! first 48 bits. They sort in creation order, so stores use the id as the
//! tie-breaker when two entities share a `created_at` value.

use uuid::Uuid;

/// Generate a new UUIDv7 identifier.
///
/// # Example
///
/// ```
/// use keepsake_core::uuid_utils::new_v7;
///
/// let id = new_v7();
/// assert_eq!(id.get_version_num(), 7);
/// ```
#[inline]
pub fn new_v7() -> Uuid {
    Uuid::now_v7()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_v7_is_version_7() {
        assert_eq!(new_v7().get_version_num(), 7);
    }
}
