//! `quill-core` — shared foundation for the blogging backend.
//!
//! This crate contains **pure** primitives (typed ids, the error taxonomy);
//! no HTTP, storage, or crypto concerns.

pub mod error;
pub mod id;

pub use error::{CoreError, CoreResult};
pub use id::{CategoryId, CommentId, PostId, UserId};
