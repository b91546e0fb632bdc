use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
};

use quill_core::{CommentId, CoreError, PostId};
use quill_domain::{Comment, CreateComment, UpdateComment, check};

use crate::app::{dto, errors::ApiError, extract::ApiJson, services::AppServices};
use crate::authz;
use crate::context::{AdminContext, IdentityContext};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_comments).post(create_comment))
        .route("/:id", put(update_comment).delete(delete_comment))
}

/// POST /api/comments — any authenticated account. The author's username is
/// denormalized onto the comment at creation time.
pub async fn create_comment(
    Extension(services): Extension<Arc<AppServices>>,
    identity: IdentityContext,
    ApiJson(body): ApiJson<CreateComment>,
) -> Result<Response, ApiError> {
    check(&body)?;

    let post_id: PostId = body.post_id.parse()?;
    if services.posts.find_by_id(&post_id)?.is_none() {
        return Err(CoreError::not_found("post").into());
    }

    let author = services
        .users
        .find_by_id(&identity.user_id())?
        .ok_or(CoreError::not_found("user"))?;

    let comment = Comment::new(post_id, author.id, author.username, body.text);
    services.comments.insert(comment.clone())?;

    Ok((StatusCode::CREATED, Json(dto::comment_to_json(&comment))).into_response())
}

/// GET /api/comments — admin only.
pub async fn list_comments(
    Extension(services): Extension<Arc<AppServices>>,
    _admin: AdminContext,
) -> Result<Response, ApiError> {
    let comments = services.comments.list_all()?;
    let body: Vec<_> = comments.iter().map(dto::comment_to_json).collect();
    Ok((StatusCode::OK, Json(body)).into_response())
}

/// PUT /api/comments/:id — the author only; a failed ownership check stops
/// the request cold.
pub async fn update_comment(
    Extension(services): Extension<Arc<AppServices>>,
    identity: IdentityContext,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<UpdateComment>,
) -> Result<Response, ApiError> {
    let id: CommentId = id.parse()?;
    check(&body)?;

    let comment = services
        .comments
        .find_by_id(&id)?
        .ok_or(CoreError::not_found("comment"))?;

    authz::ensure_owner(&identity.identity(), comment.author)?;

    let updated = services
        .comments
        .update(&id, |comment| comment.text = body.text)?
        .ok_or(CoreError::not_found("comment"))?;

    Ok((StatusCode::OK, Json(dto::comment_to_json(&updated))).into_response())
}

/// DELETE /api/comments/:id — the author or an admin.
pub async fn delete_comment(
    Extension(services): Extension<Arc<AppServices>>,
    identity: IdentityContext,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id: CommentId = id.parse()?;

    let comment = services
        .comments
        .find_by_id(&id)?
        .ok_or(CoreError::not_found("comment"))?;

    authz::ensure_owner_or_admin(&identity.identity(), comment.author)?;

    services.comments.delete(&id)?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "message": "comment has been deleted" })),
    )
        .into_response())
}
