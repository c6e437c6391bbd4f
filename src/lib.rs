//! Favorites Service - lets users bookmark content and list, filter,
//! remove or toggle their favorites.
//!
//! Listings are served through a read-through cache that is invalidated on
//! every write; the store's unique `(user_id, content_id)` index is the
//! final guard against duplicates.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use service::FavoriteManager;
pub use tasks::spawn_cleanup_task;
