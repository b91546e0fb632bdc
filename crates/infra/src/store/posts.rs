use chrono::Utc;

use quill_core::{PostId, UserId};
use quill_domain::{MediaAsset, Post};

use super::{Collection, StoreError};

/// Page size for post listings.
pub const POSTS_PER_PAGE: usize = 3;

/// Typed facade over the post collection.
#[derive(Debug, Default)]
pub struct PostStore {
    posts: Collection<PostId, Post>,
}

impl PostStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, post: Post) -> Result<(), StoreError> {
        self.posts.insert(post.id, post)
    }

    pub fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, StoreError> {
        self.posts.get(id)
    }

    /// Public listing, newest first. `page` (1-based) pages by
    /// [`POSTS_PER_PAGE`]; `category` filters; neither returns everything.
    pub fn list(
        &self,
        page: Option<usize>,
        category: Option<&str>,
    ) -> Result<Vec<Post>, StoreError> {
        let mut posts = match category {
            Some(category) => self.posts.find(|p| p.category == category)?,
            None => self.posts.find(|_| true)?,
        };
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        if let Some(page) = page {
            // Saturate so an absurd page number yields an empty page, not a
            // panic.
            let skip = page.saturating_sub(1).saturating_mul(POSTS_PER_PAGE);
            posts = posts.into_iter().skip(skip).take(POSTS_PER_PAGE).collect();
        }
        Ok(posts)
    }

    pub fn count(&self) -> Result<usize, StoreError> {
        self.posts.count()
    }

    /// Atomically mutate a post; stamps `updated_at`.
    pub fn update<F>(&self, id: &PostId, f: F) -> Result<Option<Post>, StoreError>
    where
        F: FnOnce(&mut Post),
    {
        self.posts.update(id, |post| {
            f(post);
            post.updated_at = Utc::now();
        })
    }

    pub fn set_image(&self, id: &PostId, image: MediaAsset) -> Result<Option<Post>, StoreError> {
        self.update(id, |post| post.image = image)
    }

    /// Flip `user`'s membership in the post's likes set as one conditional
    /// update: present → removed, absent → added. Atomic under the collection
    /// write lock, so concurrent identical toggles cannot lose updates.
    pub fn toggle_like(&self, id: &PostId, user: UserId) -> Result<Option<Post>, StoreError> {
        self.posts.update(id, |post| {
            match post.likes.iter().position(|u| *u == user) {
                Some(index) => {
                    post.likes.remove(index);
                }
                None => post.likes.push(user),
            }
        })
    }

    pub fn delete(&self, id: &PostId) -> Result<Option<Post>, StoreError> {
        self.posts.remove(id)
    }

    pub fn find_by_author(&self, author: UserId) -> Result<Vec<Post>, StoreError> {
        self.posts.find(|p| p.author == author)
    }

    /// Cascade support: remove every post owned by `author`, returning the
    /// removed records so their media assets can be cleaned up.
    pub fn delete_by_author(&self, author: UserId) -> Result<Vec<Post>, StoreError> {
        self.posts.remove_where(|p| p.author == author)
    }
}
