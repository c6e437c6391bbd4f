//! Request DTOs for the favorites API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::{Deserialize, Serialize};

/// Request body for adding or toggling a favorite
/// (POST /api/favorites, POST /api/favorites/toggle)
///
/// Required fields default to an empty string when missing so that
/// `validate` can report them by name instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub content_id: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

impl FavoriteRequest {
    /// Validates the request data
    ///
    /// Returns an error message naming the first blank required field,
    /// None if valid.
    pub fn validate(&self) -> Option<String> {
        let required = [
            ("userId", &self.user_id),
            ("contentId", &self.content_id),
            ("contentType", &self.content_type),
            ("title", &self.title),
        ];

        required
            .iter()
            .find(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| format!("{} is required", field))
    }
}
