//! Favorite Store Module
//!
//! Persistence seam for favorites, keyed by the compound identity
//! `(user_id, content_id)`.

mod memory;

#[cfg(test)]
pub(crate) mod counting;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{Favorite, NewFavorite};

pub use memory::InMemoryFavoriteStore;

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// == Favorite Store ==
/// Capability the manager needs from a persistence backend.
///
/// Implementations must enforce uniqueness of `(user_id, content_id)` on
/// `save` and report a violation as [`StoreError::UniqueViolation`].
#[async_trait]
pub trait FavoriteStore: Send + Sync {
    /// All favorites of a user, in creation order.
    async fn find_by_user(&self, user_id: &str) -> StoreResult<Vec<Favorite>>;

    /// Favorites of a user whose content type matches exactly.
    async fn find_by_user_and_type(
        &self,
        user_id: &str,
        content_type: &str,
    ) -> StoreResult<Vec<Favorite>>;

    async fn exists_by_user_and_content(&self, user_id: &str, content_id: &str)
        -> StoreResult<bool>;

    async fn find_by_user_and_content(
        &self,
        user_id: &str,
        content_id: &str,
    ) -> StoreResult<Option<Favorite>>;

    /// Deletes the favorite for the pair. No-op if absent.
    async fn delete_by_user_and_content(&self, user_id: &str, content_id: &str)
        -> StoreResult<()>;

    /// Persists a new favorite and assigns its id.
    async fn save(&self, favorite: NewFavorite) -> StoreResult<Favorite>;
}
