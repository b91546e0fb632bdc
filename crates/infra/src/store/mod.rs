//! Document storage: a generic in-memory collection plus typed facades.

use thiserror::Error;

pub mod categories;
pub mod collection;
pub mod comments;
pub mod posts;
pub mod users;

pub use categories::CategoryStore;
pub use collection::Collection;
pub use comments::CommentStore;
pub use posts::{POSTS_PER_PAGE, PostStore};
pub use users::UserStore;

/// Store-level failure, surfaced distinctly rather than swallowed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("document store unavailable: {0}")]
    Unavailable(&'static str),
}
