//! Response DTOs for the favorites API
//!
//! Defines the structure of outgoing HTTP response bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::CacheStats;
use crate::models::Favorite;

/// Transfer object for a favorite, returned by every read and by add/toggle.
///
/// Also the value type held by the favorites caches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteDto {
    pub id: String,
    pub user_id: String,
    pub content_id: String,
    pub content_type: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Favorite> for FavoriteDto {
    fn from(favorite: Favorite) -> Self {
        Self {
            id: favorite.id,
            user_id: favorite.user_id,
            content_id: favorite.content_id,
            content_type: favorite.content_type,
            title: favorite.title,
            description: favorite.description,
            thumbnail_url: favorite.thumbnail_url,
            created_at: favorite.created_at,
            updated_at: favorite.updated_at,
        }
    }
}

/// Statistics of a single cache region
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionStatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of capacity evictions
    pub evictions: u64,
    /// Number of explicit invalidations
    pub invalidations: u64,
    /// Current number of entries in the region
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<&CacheStats> for RegionStatsResponse {
    fn from(stats: &CacheStats) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            invalidations: stats.invalidations,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
///
/// Region fields are omitted when the service runs without a cache.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorites: Option<RegionStatsResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorites_by_type: Option<RegionStatsResponse>,
}

impl StatsResponse {
    /// Stats for a service with a cache.
    pub fn new(favorites: &CacheStats, favorites_by_type: &CacheStats) -> Self {
        Self {
            enabled: true,
            favorites: Some(favorites.into()),
            favorites_by_type: Some(favorites_by_type.into()),
        }
    }

    /// Stats for a service running without a cache.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            favorites: None,
            favorites_by_type: None,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
