use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use quill_core::{CategoryId, UserId};

/// A post category, created by an admin.
#[derive(Debug, Clone)]
pub struct Category {
    pub id: CategoryId,
    pub author: UserId,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(author: UserId, title: String) -> Self {
        Self {
            id: CategoryId::new(),
            author,
            title,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategory {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
}
