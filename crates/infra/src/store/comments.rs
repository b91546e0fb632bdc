use chrono::Utc;

use quill_core::{CommentId, PostId, UserId};
use quill_domain::Comment;

use super::{Collection, StoreError};

/// Typed facade over the comment collection.
#[derive(Debug, Default)]
pub struct CommentStore {
    comments: Collection<CommentId, Comment>,
}

impl CommentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, comment: Comment) -> Result<(), StoreError> {
        self.comments.insert(comment.id, comment)
    }

    pub fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, StoreError> {
        self.comments.get(id)
    }

    /// Admin listing, newest first.
    pub fn list_all(&self) -> Result<Vec<Comment>, StoreError> {
        let mut comments = self.comments.find(|_| true)?;
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(comments)
    }

    pub fn find_by_post(&self, post_id: PostId) -> Result<Vec<Comment>, StoreError> {
        self.comments.find(|c| c.post_id == post_id)
    }

    pub fn update<F>(&self, id: &CommentId, f: F) -> Result<Option<Comment>, StoreError>
    where
        F: FnOnce(&mut Comment),
    {
        self.comments.update(id, |comment| {
            f(comment);
            comment.updated_at = Utc::now();
        })
    }

    pub fn delete(&self, id: &CommentId) -> Result<Option<Comment>, StoreError> {
        self.comments.remove(id)
    }

    /// Cascade: remove every comment on `post_id`; returns how many went.
    pub fn delete_by_post(&self, post_id: PostId) -> Result<usize, StoreError> {
        Ok(self.comments.remove_where(|c| c.post_id == post_id)?.len())
    }

    /// Cascade: remove every comment authored by `author`.
    pub fn delete_by_author(&self, author: UserId) -> Result<usize, StoreError> {
        Ok(self.comments.remove_where(|c| c.author == author)?.len())
    }
}
