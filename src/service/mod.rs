//! Favorite management: the manager orchestrating store and cache.

mod manager;


pub use manager::FavoriteManager;
