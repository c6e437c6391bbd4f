//! API Handlers
//!
//! HTTP request handlers for each favorites endpoint. Handlers validate
//! input and map manager results to status codes; all domain rules live in
//! [`FavoriteManager`].

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use crate::cache::{CacheName, InMemoryFavoriteCache};
use crate::config::Config;
use crate::error::{FavoriteError, Result};
use crate::models::{FavoriteDto, FavoriteRequest, HealthResponse, StatsResponse};
use crate::service::FavoriteManager;
use crate::store::InMemoryFavoriteStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub manager: FavoriteManager,
    /// The in-memory cache behind the manager, kept for stats and cleanup
    pub cache: Option<Arc<InMemoryFavoriteCache>>,
}

impl AppState {
    pub fn new(manager: FavoriteManager, cache: Option<Arc<InMemoryFavoriteCache>>) -> Self {
        Self { manager, cache }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Uses the in-memory store, and the in-memory cache unless disabled.
    pub fn from_config(config: &Config) -> Self {
        let store = Arc::new(InMemoryFavoriteStore::new());

        if config.cache_enabled {
            let cache = Arc::new(InMemoryFavoriteCache::from_config(config));
            let manager = FavoriteManager::new(store, Some(cache.clone()));
            Self::new(manager, Some(cache))
        } else {
            Self::new(FavoriteManager::without_cache(store), None)
        }
    }
}

fn validate(request: &FavoriteRequest) -> Result<()> {
    match request.validate() {
        Some(message) => Err(FavoriteError::Validation(message)),
        None => Ok(()),
    }
}

/// Handler for GET /api/favorites/user/:user_id
pub async fn list_favorites_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<FavoriteDto>>> {
    info!(%user_id, "list favorites");
    let favorites = state.manager.get_user_favorites(&user_id).await?;
    Ok(Json(favorites))
}

/// Handler for GET /api/favorites/user/:user_id/type/:content_type
pub async fn list_favorites_by_type_handler(
    State(state): State<AppState>,
    Path((user_id, content_type)): Path<(String, String)>,
) -> Result<Json<Vec<FavoriteDto>>> {
    info!(%user_id, %content_type, "list favorites by type");
    let favorites = state
        .manager
        .get_user_favorites_by_type(&user_id, &content_type)
        .await?;
    Ok(Json(favorites))
}

/// Handler for POST /api/favorites
///
/// 201 with the new favorite, 400 when invalid or already a favorite.
pub async fn add_favorite_handler(
    State(state): State<AppState>,
    Json(req): Json<FavoriteRequest>,
) -> Result<(StatusCode, Json<FavoriteDto>)> {
    validate(&req)?;

    let favorite = state.manager.add_favorite(&req).await?;
    Ok((StatusCode::CREATED, Json(favorite)))
}

/// Handler for DELETE /api/favorites/user/:user_id/content/:content_id
///
/// 204 when removed, 404 when there was no such favorite.
pub async fn remove_favorite_handler(
    State(state): State<AppState>,
    Path((user_id, content_id)): Path<(String, String)>,
) -> Result<StatusCode> {
    let removed = state
        .manager
        .remove_favorite(&user_id, &content_id)
        .await?;

    Ok(if removed {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    })
}

/// Handler for POST /api/favorites/toggle
///
/// 200 with the favorite when added, 204 when removed.
pub async fn toggle_favorite_handler(
    State(state): State<AppState>,
    Json(req): Json<FavoriteRequest>,
) -> Result<Response> {
    validate(&req)?;

    Ok(match state.manager.toggle_favorite(&req).await? {
        Some(favorite) => (StatusCode::OK, Json(favorite)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    match &state.cache {
        Some(cache) => {
            let favorites = cache.stats(CacheName::Favorites).await;
            let by_type = cache.stats(CacheName::FavoritesByType).await;
            Json(StatsResponse::new(&favorites, &by_type))
        }
        None => Json(StatsResponse::disabled()),
    }
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
