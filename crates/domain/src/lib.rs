//! `quill-domain` — entity records and validated inputs.
//!
//! One module per resource, each holding the stored record shape plus the
//! request payloads it accepts. Pure data: no IO, no HTTP, no storage.

pub mod category;
pub mod comment;
pub mod media;
pub mod post;
pub mod user;
pub mod validate;

pub use category::{Category, CreateCategory};
pub use comment::{Comment, CreateComment, UpdateComment};
pub use media::MediaAsset;
pub use post::{CreatePost, Post, UpdatePost};
pub use user::{LoginUser, RegisterUser, UpdateProfile, User};
pub use validate::check;
