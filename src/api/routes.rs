//! API Routes
//!
//! Configures the Axum router with all favorites endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    add_favorite_handler, health_handler, list_favorites_by_type_handler,
    list_favorites_handler, remove_favorite_handler, stats_handler, toggle_favorite_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/favorites", post(add_favorite_handler))
        .route("/api/favorites/toggle", post(toggle_favorite_handler))
        .route("/api/favorites/user/:user_id", get(list_favorites_handler))
        .route(
            "/api/favorites/user/:user_id/type/:content_type",
            get(list_favorites_by_type_handler),
        )
        .route(
            "/api/favorites/user/:user_id/content/:content_id",
            delete(remove_favorite_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
