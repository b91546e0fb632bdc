use axum::{Router, routing::get};

pub mod auth;
pub mod categories;
pub mod comments;
pub mod common;
pub mod posts;
pub mod system;
pub mod users;

/// Full routing tree. Authentication is enforced per handler via the
/// identity extractors, since most resources mix public and private methods
/// on the same paths.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .nest("/api/auth", auth::router())
        .nest("/api/users", users::router())
        .nest("/api/posts", posts::router())
        .nest("/api/comments", comments::router())
        .nest("/api/categories", categories::router())
}
