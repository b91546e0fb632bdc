use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use quill_core::{CommentId, PostId, UserId};

/// A comment on a post.
///
/// `username` is denormalized from the author's account at creation time,
/// matching the source system's record shape.
#[derive(Debug, Clone)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub author: UserId,
    pub username: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(post_id: PostId, author: UserId, username: String, text: String) -> Self {
        let now = Utc::now();
        Self {
            id: CommentId::new(),
            post_id,
            author,
            username,
            text,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateComment {
    #[serde(rename = "postId")]
    pub post_id: String,

    #[validate(length(min = 1, message = "text is required"))]
    pub text: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateComment {
    #[validate(length(min = 1, message = "text is required"))]
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check;
    use quill_core::CoreError;

    #[test]
    fn empty_text_is_rejected_with_message() {
        let input = UpdateComment { text: String::new() };
        assert_eq!(
            check(&input).unwrap_err(),
            CoreError::InvalidInput("text is required".into())
        );
    }
}
