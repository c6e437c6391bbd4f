//! Store wrapper for tests that counts calls per operation.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::models::{Favorite, NewFavorite};
use crate::store::{FavoriteStore, InMemoryFavoriteStore, StoreResult};

#[derive(Debug, Default)]
pub(crate) struct CountingStore {
    inner: InMemoryFavoriteStore,
    /// Makes `exists_by_user_and_content` always answer false, as a
    /// concurrent add that lost the race would observe.
    stale_exists: bool,
    reads: AtomicUsize,
    saves: AtomicUsize,
    deletes: AtomicUsize,
    /// Holds the next listing call after it has read, until `resume_read`.
    pause_next_read: AtomicBool,
    read_paused: Notify,
    read_resumed: Notify,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stale_exists() -> Self {
        Self {
            stale_exists: true,
            ..Self::default()
        }
    }

    /// Calls to the two listing operations.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    pub async fn len(&self) -> usize {
        self.inner.len().await
    }

    pub fn pause_next_read(&self) {
        self.pause_next_read.store(true, Ordering::SeqCst);
    }

    /// Resolves once a paused listing call has its result in hand.
    pub async fn read_paused(&self) {
        self.read_paused.notified().await;
    }

    pub fn resume_read(&self) {
        self.read_resumed.notify_one();
    }

    async fn hold_if_paused(&self) {
        if self.pause_next_read.swap(false, Ordering::SeqCst) {
            self.read_paused.notify_one();
            self.read_resumed.notified().await;
        }
    }
}

#[async_trait]
impl FavoriteStore for CountingStore {
    async fn find_by_user(&self, user_id: &str) -> StoreResult<Vec<Favorite>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let favorites = self.inner.find_by_user(user_id).await;
        self.hold_if_paused().await;
        favorites
    }

    async fn find_by_user_and_type(
        &self,
        user_id: &str,
        content_type: &str,
    ) -> StoreResult<Vec<Favorite>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let favorites = self.inner.find_by_user_and_type(user_id, content_type).await;
        self.hold_if_paused().await;
        favorites
    }

    async fn exists_by_user_and_content(
        &self,
        user_id: &str,
        content_id: &str,
    ) -> StoreResult<bool> {
        if self.stale_exists {
            return Ok(false);
        }
        self.inner.exists_by_user_and_content(user_id, content_id).await
    }

    async fn find_by_user_and_content(
        &self,
        user_id: &str,
        content_id: &str,
    ) -> StoreResult<Option<Favorite>> {
        self.inner.find_by_user_and_content(user_id, content_id).await
    }

    async fn delete_by_user_and_content(
        &self,
        user_id: &str,
        content_id: &str,
    ) -> StoreResult<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete_by_user_and_content(user_id, content_id).await
    }

    async fn save(&self, favorite: NewFavorite) -> StoreResult<Favorite> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save(favorite).await
    }
}
