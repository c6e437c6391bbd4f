//! In-Memory Favorite Store
//!
//! Document-store stand-in holding favorites in insertion order, with the
//! `(user_id, content_id)` unique index checked under the write lock.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{Favorite, NewFavorite};
use crate::store::{FavoriteStore, StoreResult};

// == In-Memory Store ==
#[derive(Debug, Default)]
pub struct InMemoryFavoriteStore {
    favorites: RwLock<Vec<Favorite>>,
}

impl InMemoryFavoriteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored favorites across all users.
    pub async fn len(&self) -> usize {
        self.favorites.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.favorites.read().await.is_empty()
    }
}

fn same_pair(favorite: &Favorite, user_id: &str, content_id: &str) -> bool {
    favorite.user_id == user_id && favorite.content_id == content_id
}

#[async_trait]
impl FavoriteStore for InMemoryFavoriteStore {
    async fn find_by_user(&self, user_id: &str) -> StoreResult<Vec<Favorite>> {
        let favorites = self.favorites.read().await;
        Ok(favorites
            .iter()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_user_and_type(
        &self,
        user_id: &str,
        content_type: &str,
    ) -> StoreResult<Vec<Favorite>> {
        let favorites = self.favorites.read().await;
        Ok(favorites
            .iter()
            .filter(|f| f.user_id == user_id && f.content_type == content_type)
            .cloned()
            .collect())
    }

    async fn exists_by_user_and_content(
        &self,
        user_id: &str,
        content_id: &str,
    ) -> StoreResult<bool> {
        let favorites = self.favorites.read().await;
        Ok(favorites.iter().any(|f| same_pair(f, user_id, content_id)))
    }

    async fn find_by_user_and_content(
        &self,
        user_id: &str,
        content_id: &str,
    ) -> StoreResult<Option<Favorite>> {
        let favorites = self.favorites.read().await;
        Ok(favorites
            .iter()
            .find(|f| same_pair(f, user_id, content_id))
            .cloned())
    }

    async fn delete_by_user_and_content(
        &self,
        user_id: &str,
        content_id: &str,
    ) -> StoreResult<()> {
        let mut favorites = self.favorites.write().await;
        let before = favorites.len();
        favorites.retain(|f| !same_pair(f, user_id, content_id));
        debug!(
            removed = before - favorites.len(),
            user_id, content_id, "delete_by_user_and_content"
        );
        Ok(())
    }

    async fn save(&self, favorite: NewFavorite) -> StoreResult<Favorite> {
        let mut favorites = self.favorites.write().await;

        if favorites
            .iter()
            .any(|f| same_pair(f, &favorite.user_id, &favorite.content_id))
        {
            return Err(StoreError::UniqueViolation {
                user_id: favorite.user_id,
                content_id: favorite.content_id,
            });
        }

        let saved = favorite.with_id(Uuid::new_v4().to_string());
        favorites.push(saved.clone());
        Ok(saved)
    }
}
