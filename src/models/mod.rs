//! Data model for the favorites service
//!
//! `favorite` holds the persisted entity, `requests` and `responses` hold
//! the DTOs used for serializing/deserializing HTTP bodies.

pub mod favorite;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use favorite::{Favorite, NewFavorite};
pub use requests::FavoriteRequest;
pub use responses::{
    ErrorResponse, FavoriteDto, HealthResponse, RegionStatsResponse, StatsResponse,
};
