//! Favorite Entity
//!
//! The only persisted record of the service.

use chrono::{DateTime, Utc};

use crate::models::FavoriteRequest;

// == Favorite ==
/// A user's bookmark of one piece of content, as held by the store.
///
/// `title`, `description` and `thumbnail_url` are a snapshot taken when the
/// favorite was added and are never re-synced with the content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorite {
    /// Store-assigned identifier
    pub id: String,
    pub user_id: String,
    pub content_id: String,
    /// Free-form category tag such as "COURSE" or "VIDEO"
    pub content_type: String,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Always equal to `created_at`; favorites are never updated in place
    pub updated_at: DateTime<Utc>,
}

// == New Favorite ==
/// A favorite that has not been saved yet and therefore has no id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFavorite {
    pub user_id: String,
    pub content_id: String,
    pub content_type: String,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewFavorite {
    /// Builds an unsaved favorite from a request, stamped with `now`.
    pub fn from_request(request: &FavoriteRequest, now: DateTime<Utc>) -> Self {
        Self {
            user_id: request.user_id.clone(),
            content_id: request.content_id.clone(),
            content_type: request.content_type.clone(),
            title: request.title.clone(),
            description: request.description.clone(),
            thumbnail_url: request.thumbnail_url.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Attaches the identifier chosen by the store.
    pub fn with_id(self, id: String) -> Favorite {
        Favorite {
            id,
            user_id: self.user_id,
            content_id: self.content_id,
            content_type: self.content_type,
            title: self.title,
            description: self.description,
            thumbnail_url: self.thumbnail_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
