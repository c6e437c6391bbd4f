//! API Module
//!
//! HTTP handlers and routing for the favorites REST API.
//!
//! # Endpoints
//! - `GET /api/favorites/user/:user_id` - All favorites of a user
//! - `GET /api/favorites/user/:user_id/type/:content_type` - Favorites of one type
//! - `POST /api/favorites` - Add a favorite
//! - `DELETE /api/favorites/user/:user_id/content/:content_id` - Remove a favorite
//! - `POST /api/favorites/toggle` - Add or remove a favorite
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
