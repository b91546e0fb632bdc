//! Collaborator wiring for the HTTP layer.

use std::sync::Arc;

use quill_auth::Hs256TokenCodec;
use quill_infra::{
    CategoryStore, CommentStore, InMemoryMediaStore, MediaStore, PostStore, UserStore,
};

use crate::config::AppConfig;

/// Shared service handles; one instance per process, injected into handlers
/// as an extension.
pub struct AppServices {
    pub users: UserStore,
    pub posts: PostStore,
    pub comments: CommentStore,
    pub categories: CategoryStore,
    pub media: Arc<dyn MediaStore>,
    pub tokens: Arc<Hs256TokenCodec>,
}

pub fn build_services(config: &AppConfig, tokens: Arc<Hs256TokenCodec>) -> AppServices {
    let media: Arc<dyn MediaStore> = Arc::new(InMemoryMediaStore::new(config.media.clone()));

    AppServices {
        users: UserStore::new(),
        posts: PostStore::new(),
        comments: CommentStore::new(),
        categories: CategoryStore::new(),
        media,
        tokens,
    }
}
