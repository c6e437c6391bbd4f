//! Favorite Manager
//!
//! Implements list, list-by-type, add, remove and toggle over a
//! [`FavoriteStore`], with an optional [`FavoriteCache`] in front of the
//! two listing operations.
//!
//! Cache rules:
//! - listings are read-through on `favorites[user]` and
//!   `favoritesByType[user, type]`; a fill carries the generation of its
//!   miss, so a listing loaded before a concurrent write is not cached
//! - a successful add or delete evicts `favorites[user]` and the
//!   `favoritesByType` entry of the affected type
//! - every cache failure is logged and ignored; the store stays the source
//!   of truth

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::cache::{user_key, user_type_key, CacheLookup, CacheName, FavoriteCache, Lookup};
use crate::error::{FavoriteError, Result, StoreError};
use crate::models::{Favorite, FavoriteDto, FavoriteRequest, NewFavorite};
use crate::store::FavoriteStore;

// == Favorite Manager ==
#[derive(Clone)]
pub struct FavoriteManager {
    store: Arc<dyn FavoriteStore>,
    cache: Option<Arc<dyn FavoriteCache>>,
}

impl FavoriteManager {
    pub fn new(store: Arc<dyn FavoriteStore>, cache: Option<Arc<dyn FavoriteCache>>) -> Self {
        Self { store, cache }
    }

    /// A manager that always reads from the store.
    pub fn without_cache(store: Arc<dyn FavoriteStore>) -> Self {
        Self::new(store, None)
    }

    pub fn has_cache(&self) -> bool {
        self.cache.is_some()
    }

    // == Listing ==
    /// All favorites of a user. Empty when the user has none.
    pub async fn get_user_favorites(&self, user_id: &str) -> Result<Vec<FavoriteDto>> {
        let key = user_key(user_id);
        let generation = match self.lookup(CacheName::Favorites, &key).await {
            Some(Lookup::Hit(favorites)) => return Ok(favorites),
            Some(Lookup::Miss { generation }) => Some(generation),
            None => None,
        };

        info!(user_id, "cache miss, loading favorites");
        let favorites = to_dtos(self.store.find_by_user(user_id).await?);
        debug!(count = favorites.len(), "favorites loaded");

        self.populate(CacheName::Favorites, &key, &favorites, generation)
            .await;
        Ok(favorites)
    }

    /// Favorites of a user for one content type. The type is matched as-is.
    pub async fn get_user_favorites_by_type(
        &self,
        user_id: &str,
        content_type: &str,
    ) -> Result<Vec<FavoriteDto>> {
        let key = user_type_key(user_id, content_type);
        let generation = match self.lookup(CacheName::FavoritesByType, &key).await {
            Some(Lookup::Hit(favorites)) => return Ok(favorites),
            Some(Lookup::Miss { generation }) => Some(generation),
            None => None,
        };

        info!(user_id, content_type, "cache miss, loading favorites by type");
        let favorites = to_dtos(
            self.store
                .find_by_user_and_type(user_id, content_type)
                .await?,
        );
        debug!(count = favorites.len(), "favorites loaded");

        self.populate(CacheName::FavoritesByType, &key, &favorites, generation)
            .await;
        Ok(favorites)
    }

    // == Add ==
    /// Adds a favorite, failing with [`FavoriteError::Duplicate`] when the
    /// pair already exists.
    ///
    /// The existence check is only an early exit: a save rejected by the
    /// store's unique index is reported as the same duplicate error.
    pub async fn add_favorite(&self, request: &FavoriteRequest) -> Result<FavoriteDto> {
        info!(
            user_id = %request.user_id,
            content_id = %request.content_id,
            "adding favorite"
        );

        if self
            .store
            .exists_by_user_and_content(&request.user_id, &request.content_id)
            .await?
        {
            return Err(duplicate(&request.user_id, &request.content_id));
        }

        let saved = self
            .store
            .save(NewFavorite::from_request(request, Utc::now()))
            .await
            .map_err(|err| match err {
                StoreError::UniqueViolation {
                    user_id,
                    content_id,
                } => duplicate(&user_id, &content_id),
                other => FavoriteError::Store(other),
            })?;
        info!(id = %saved.id, "favorite added");

        self.invalidate_user(&saved.user_id, &saved.content_type)
            .await;
        Ok(saved.into())
    }

    // == Remove ==
    /// Removes a favorite. Returns false when there was nothing to remove.
    pub async fn remove_favorite(&self, user_id: &str, content_id: &str) -> Result<bool> {
        info!(user_id, content_id, "removing favorite");

        match self
            .store
            .find_by_user_and_content(user_id, content_id)
            .await?
        {
            Some(existing) => {
                self.delete_existing(&existing).await?;
                Ok(true)
            }
            None => {
                warn!(user_id, content_id, "favorite to remove does not exist");
                Ok(false)
            }
        }
    }

    // == Toggle ==
    /// Removes the favorite if present, otherwise adds it.
    ///
    /// Returns the added favorite, or `None` when the toggle removed one.
    pub async fn toggle_favorite(&self, request: &FavoriteRequest) -> Result<Option<FavoriteDto>> {
        info!(
            user_id = %request.user_id,
            content_id = %request.content_id,
            "toggling favorite"
        );

        match self
            .store
            .find_by_user_and_content(&request.user_id, &request.content_id)
            .await?
        {
            Some(existing) => {
                self.delete_existing(&existing).await?;
                Ok(None)
            }
            None => self.add_favorite(request).await.map(Some),
        }
    }

    async fn delete_existing(&self, favorite: &Favorite) -> Result<()> {
        self.store
            .delete_by_user_and_content(&favorite.user_id, &favorite.content_id)
            .await?;
        info!(id = %favorite.id, "favorite removed");

        self.invalidate_user(&favorite.user_id, &favorite.content_type)
            .await;
        Ok(())
    }

    // == Cache Helpers ==
    /// `None` when there is no cache or it failed.
    async fn lookup(&self, cache: CacheName, key: &str) -> Option<CacheLookup> {
        let backend = self.cache.as_ref()?;
        match backend.get(cache, key).await {
            Ok(lookup) => Some(lookup),
            Err(err) => {
                warn!(%cache, key, error = %err, "cache read failed, using store");
                None
            }
        }
    }

    async fn populate(
        &self,
        cache: CacheName,
        key: &str,
        favorites: &[FavoriteDto],
        generation: Option<u64>,
    ) {
        let (Some(backend), Some(generation)) = (self.cache.as_ref(), generation) else {
            return;
        };
        match backend.put(cache, key, favorites.to_vec(), generation).await {
            Ok(true) => {}
            Ok(false) => debug!(%cache, key, "listing changed while loading, not cached"),
            Err(err) => warn!(%cache, key, error = %err, "cache write failed"),
        }
    }

    async fn evict(&self, cache: CacheName, key: &str) {
        let Some(backend) = self.cache.as_ref() else {
            return;
        };
        if let Err(err) = backend.evict(cache, key).await {
            warn!(%cache, key, error = %err, "cache eviction failed");
        }
    }

    async fn invalidate_user(&self, user_id: &str, content_type: &str) {
        self.evict(CacheName::Favorites, &user_key(user_id)).await;
        self.evict(
            CacheName::FavoritesByType,
            &user_type_key(user_id, content_type),
        )
        .await;
    }
}

fn to_dtos(favorites: Vec<Favorite>) -> Vec<FavoriteDto> {
    favorites.into_iter().map(FavoriteDto::from).collect()
}

fn duplicate(user_id: &str, content_id: &str) -> FavoriteError {
    warn!(user_id, content_id, "favorite already exists");
    FavoriteError::Duplicate {
        user_id: user_id.to_string(),
        content_id: content_id.to_string(),
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::cache::{CacheResult, InMemoryFavoriteCache};
    use crate::error::CacheError;
    use crate::store::counting::CountingStore;

    fn request(user_id: &str, content_id: &str, content_type: &str) -> FavoriteRequest {
        FavoriteRequest {
            user_id: user_id.to_string(),
            content_id: content_id.to_string(),
            content_type: content_type.to_string(),
            title: "Test Course".to_string(),
            description: None,
            thumbnail_url: None,
        }
    }

    fn cached_manager() -> (FavoriteManager, Arc<CountingStore>, Arc<InMemoryFavoriteCache>) {
        let store = Arc::new(CountingStore::new());
        let cache = Arc::new(InMemoryFavoriteCache::new(100, Duration::from_secs(300)));
        let manager = FavoriteManager::new(store.clone(), Some(cache.clone()));
        (manager, store, cache)
    }

    /// Cache whose every operation fails.
    struct BrokenCache;

    #[async_trait]
    impl FavoriteCache for BrokenCache {
        async fn get(&self, _: CacheName, _: &str) -> CacheResult<CacheLookup> {
            Err(CacheError::Unavailable("down".to_string()))
        }

        async fn put(
            &self,
            _: CacheName,
            _: &str,
            _: Vec<FavoriteDto>,
            _: u64,
        ) -> CacheResult<bool> {
            Err(CacheError::Unavailable("down".to_string()))
        }

        async fn evict(&self, _: CacheName, _: &str) -> CacheResult<()> {
            Err(CacheError::Unavailable("down".to_string()))
        }
    }

    #[tokio::test]
    async fn test_add_scenario() {
        let (manager, store, _) = cached_manager();
        let req = request("user123", "content456", "COURSE");

        let added = manager.add_favorite(&req).await.unwrap();
        assert!(!added.id.is_empty());
        assert_eq!(added.created_at, added.updated_at);
        assert_eq!(added.title, "Test Course");

        let again = manager.add_favorite(&req).await;
        assert!(matches!(again, Err(FavoriteError::Duplicate { .. })));
        assert_eq!(store.saves(), 1, "duplicate add must not write");

        assert!(manager
            .remove_favorite("user123", "content456")
            .await
            .unwrap());
        assert!(!manager
            .remove_favorite("user123", "content456")
            .await
            .unwrap());

        let toggled = manager.toggle_favorite(&req).await.unwrap();
        assert!(toggled.is_some());
        let toggled = manager.toggle_favorite(&req).await.unwrap();
        assert!(toggled.is_none());
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_empty_user_has_no_favorites() {
        let (manager, _, _) = cached_manager();

        assert!(manager.get_user_favorites("nobody").await.unwrap().is_empty());
        assert!(manager
            .get_user_favorites_by_type("nobody", "VIDEO")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_second_read_is_served_from_cache() {
        let (manager, store, _) = cached_manager();
        manager
            .add_favorite(&request("u1", "c1", "COURSE"))
            .await
            .unwrap();

        let first = manager.get_user_favorites("u1").await.unwrap();
        let second = manager.get_user_favorites("u1").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.reads(), 1);
    }

    #[tokio::test]
    async fn test_by_type_read_is_cached_per_type() {
        let (manager, store, _) = cached_manager();
        manager
            .add_favorite(&request("u1", "c1", "COURSE"))
            .await
            .unwrap();
        manager
            .add_favorite(&request("u1", "c2", "VIDEO"))
            .await
            .unwrap();

        let courses = manager
            .get_user_favorites_by_type("u1", "COURSE")
            .await
            .unwrap();
        manager
            .get_user_favorites_by_type("u1", "COURSE")
            .await
            .unwrap();
        let videos = manager
            .get_user_favorites_by_type("u1", "VIDEO")
            .await
            .unwrap();

        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].content_id, "c1");
        assert_eq!(videos[0].content_id, "c2");
        assert_eq!(store.reads(), 2);
    }

    #[tokio::test]
    async fn test_add_invalidates_user_listing() {
        let (manager, store, _) = cached_manager();
        manager.get_user_favorites("u1").await.unwrap();

        manager
            .add_favorite(&request("u1", "c1", "COURSE"))
            .await
            .unwrap();
        let favorites = manager.get_user_favorites("u1").await.unwrap();

        assert_eq!(favorites.len(), 1);
        assert_eq!(store.reads(), 2);
    }

    #[tokio::test]
    async fn test_add_invalidates_only_its_type() {
        let (manager, store, _) = cached_manager();
        manager
            .get_user_favorites_by_type("u1", "COURSE")
            .await
            .unwrap();
        manager
            .get_user_favorites_by_type("u1", "VIDEO")
            .await
            .unwrap();

        manager
            .add_favorite(&request("u1", "c1", "COURSE"))
            .await
            .unwrap();
        let courses = manager
            .get_user_favorites_by_type("u1", "COURSE")
            .await
            .unwrap();
        manager
            .get_user_favorites_by_type("u1", "VIDEO")
            .await
            .unwrap();

        assert_eq!(courses.len(), 1);
        assert_eq!(store.reads(), 3, "VIDEO listing stays cached");
    }

    #[tokio::test]
    async fn test_remove_invalidates_listing_and_stored_type() {
        let (manager, store, _) = cached_manager();
        manager
            .add_favorite(&request("u1", "c1", "COURSE"))
            .await
            .unwrap();
        manager.get_user_favorites("u1").await.unwrap();
        manager
            .get_user_favorites_by_type("u1", "COURSE")
            .await
            .unwrap();
        assert_eq!(store.reads(), 2);

        assert!(manager.remove_favorite("u1", "c1").await.unwrap());

        assert!(manager.get_user_favorites("u1").await.unwrap().is_empty());
        assert!(manager
            .get_user_favorites_by_type("u1", "COURSE")
            .await
            .unwrap()
            .is_empty());
        assert_eq!(store.reads(), 4);
    }

    #[tokio::test]
    async fn test_remove_absent_keeps_cache() {
        let (manager, store, _) = cached_manager();
        manager.get_user_favorites("u1").await.unwrap();

        assert!(!manager.remove_favorite("u1", "missing").await.unwrap());
        manager.get_user_favorites("u1").await.unwrap();

        assert_eq!(store.reads(), 1);
        assert_eq!(store.deletes(), 0);
    }

    #[tokio::test]
    async fn test_toggle_remove_uses_stored_type() {
        let (manager, _, _) = cached_manager();
        manager
            .add_favorite(&request("u1", "c1", "COURSE"))
            .await
            .unwrap();
        manager
            .get_user_favorites_by_type("u1", "COURSE")
            .await
            .unwrap();

        // the toggle request carries a different type than the stored one
        let removed = manager
            .toggle_favorite(&request("u1", "c1", "VIDEO"))
            .await
            .unwrap();

        assert!(removed.is_none());
        assert!(manager
            .get_user_favorites_by_type("u1", "COURSE")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_toggle_invalidates_listing() {
        let (manager, store, _) = cached_manager();
        let req = request("u1", "c1", "ARTICLE");
        manager.get_user_favorites("u1").await.unwrap();

        manager.toggle_favorite(&req).await.unwrap();
        assert_eq!(manager.get_user_favorites("u1").await.unwrap().len(), 1);

        manager.toggle_favorite(&req).await.unwrap();
        assert!(manager.get_user_favorites("u1").await.unwrap().is_empty());

        assert_eq!(store.reads(), 3);
    }

    #[tokio::test]
    async fn test_read_overlapping_add_does_not_cache_stale_listing() {
        let (manager, store, _) = cached_manager();
        store.pause_next_read();

        let reader = {
            let manager = manager.clone();
            tokio::spawn(async move { manager.get_user_favorites("u1").await })
        };
        store.read_paused().await;

        manager
            .add_favorite(&request("u1", "c1", "COURSE"))
            .await
            .unwrap();
        store.resume_read();

        // the overlapping read may return what it loaded, but must not cache it
        assert!(reader.await.unwrap().unwrap().is_empty());
        let favorites = manager.get_user_favorites("u1").await.unwrap();

        assert_eq!(favorites.len(), 1);
        assert_eq!(store.reads(), 2);
    }

    #[tokio::test]
    async fn test_by_type_read_overlapping_remove_does_not_cache_stale_listing() {
        let (manager, store, _) = cached_manager();
        manager
            .add_favorite(&request("u1", "c1", "VIDEO"))
            .await
            .unwrap();
        store.pause_next_read();

        let reader = {
            let manager = manager.clone();
            tokio::spawn(async move { manager.get_user_favorites_by_type("u1", "VIDEO").await })
        };
        store.read_paused().await;

        assert!(manager.remove_favorite("u1", "c1").await.unwrap());
        store.resume_read();

        assert_eq!(reader.await.unwrap().unwrap().len(), 1);
        let videos = manager
            .get_user_favorites_by_type("u1", "VIDEO")
            .await
            .unwrap();

        assert!(videos.is_empty());
        assert_eq!(store.reads(), 2);
    }

    #[tokio::test]
    async fn test_unique_violation_is_reported_as_duplicate() {
        let store = Arc::new(CountingStore::with_stale_exists());
        let manager = FavoriteManager::without_cache(store.clone());
        let req = request("u1", "c1", "COURSE");

        manager.add_favorite(&req).await.unwrap();
        let second = manager.add_favorite(&req).await;

        match second {
            Err(FavoriteError::Duplicate {
                user_id,
                content_id,
            }) => {
                assert_eq!(user_id, "u1");
                assert_eq!(content_id, "c1");
            }
            other => panic!("expected duplicate, got {:?}", other),
        }
        assert_eq!(store.saves(), 2);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_without_cache_always_reads_store() {
        let store = Arc::new(CountingStore::new());
        let manager = FavoriteManager::without_cache(store.clone());
        assert!(!manager.has_cache());

        manager.get_user_favorites("u1").await.unwrap();
        manager.get_user_favorites("u1").await.unwrap();

        assert_eq!(store.reads(), 2);
    }

    #[tokio::test]
    async fn test_broken_cache_is_bypassed() {
        let store = Arc::new(CountingStore::new());
        let manager = FavoriteManager::new(store.clone(), Some(Arc::new(BrokenCache)));
        let req = request("u1", "c1", "COURSE");

        let added = manager.add_favorite(&req).await.unwrap();
        assert_eq!(
            manager.get_user_favorites("u1").await.unwrap(),
            vec![added.clone()]
        );
        assert_eq!(
            manager
                .get_user_favorites_by_type("u1", "COURSE")
                .await
                .unwrap(),
            vec![added]
        );
        assert!(manager.toggle_favorite(&req).await.unwrap().is_none());
        assert!(!manager.remove_favorite("u1", "c1").await.unwrap());
        assert!(manager.get_user_favorites("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_oversized_cache_key_still_returns_results() {
        let (manager, store, cache) = cached_manager();
        let long_user = "u".repeat(crate::cache::MAX_KEY_LENGTH + 1);

        let favorites = manager.get_user_favorites(&long_user).await.unwrap();

        assert!(favorites.is_empty());
        assert_eq!(store.reads(), 1);
        assert_eq!(cache.len(CacheName::Favorites).await, 0);
    }

    #[tokio::test]
    async fn test_optional_fields_are_kept() {
        let (manager, _, _) = cached_manager();
        let req = FavoriteRequest {
            description: Some("Learn Rust".to_string()),
            thumbnail_url: Some("https://cdn.example.com/rust.png".to_string()),
            ..request("u1", "c1", "COURSE")
        };

        manager.add_favorite(&req).await.unwrap();
        let favorites = manager.get_user_favorites("u1").await.unwrap();

        assert_eq!(favorites[0].description.as_deref(), Some("Learn Rust"));
        assert_eq!(
            favorites[0].thumbnail_url.as_deref(),
            Some("https://cdn.example.com/rust.png")
        );
    }
}
