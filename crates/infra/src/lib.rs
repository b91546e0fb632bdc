//! `quill-infra` — collaborator adapters.
//!
//! The document store and the media service are external collaborators; this
//! crate defines the contracts the handlers consume and provides in-memory
//! implementations with the atomicity guarantees the handlers rely on
//! (notably the single-document conditional update behind like toggling).

pub mod media;
pub mod password;
pub mod store;

pub use media::{InMemoryMediaStore, MediaConfig, MediaError, MediaStore};
pub use password::{PasswordError, hash_password, verify_password};
pub use store::{
    CategoryStore, Collection, CommentStore, POSTS_PER_PAGE, PostStore, StoreError, UserStore,
};
