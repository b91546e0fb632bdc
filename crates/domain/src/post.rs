use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use quill_core::{PostId, UserId};

use crate::MediaAsset;

/// A blog post record.
///
/// # Invariants
/// - `author` is fixed at creation; ownership is not transferable.
/// - `likes` has set semantics: an account appears at most once, and
///   membership only changes through the store's atomic toggle.
#[derive(Debug, Clone)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub author: UserId,
    pub image: MediaAsset,
    pub likes: Vec<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn new(author: UserId, input: CreatePost, image: MediaAsset) -> Self {
        let now = Utc::now();
        Self {
            id: PostId::new(),
            title: input.title,
            description: input.description,
            category: input.category,
            author,
            image,
            likes: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePost {
    #[validate(length(min = 2, max = 200, message = "title must be 2-200 characters"))]
    pub title: String,

    #[validate(length(min = 10, message = "description must be at least 10 characters"))]
    pub description: String,

    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,
}

/// Post content update; absent fields untouched. The image is replaced
/// through its own route.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePost {
    #[validate(length(min = 2, max = 200, message = "title must be 2-200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 10, message = "description must be at least 10 characters"))]
    pub description: Option<String>,

    #[validate(length(min = 1, message = "category is required"))]
    pub category: Option<String>,
}
