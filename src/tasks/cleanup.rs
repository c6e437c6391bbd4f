//! Cache Cleanup Task
//!
//! Expired entries are already ignored on read; this sweep keeps entries
//! for users that are never read again from piling up.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::InMemoryFavoriteCache;

/// Spawns a background task that removes expired cache entries every
/// `interval`.
///
/// The returned handle is aborted on graceful shutdown.
pub fn spawn_cleanup_task(cache: Arc<InMemoryFavoriteCache>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(interval_secs = interval.as_secs_f64(), "starting cache cleanup task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.cleanup_expired().await;
            if removed > 0 {
                info!(removed, "cache cleanup removed expired entries");
            } else {
                debug!("cache cleanup found no expired entries");
            }
        }
    })
}
