use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Multipart, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
};

use quill_core::{CoreError, PostId};
use quill_domain::{CreatePost, Post, UpdatePost, check};

use crate::app::routes::common;
use crate::app::{
    dto::{self, PostListQuery},
    errors::ApiError,
    extract::ApiJson,
    services::AppServices,
};
use crate::authz;
use crate::context::IdentityContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/count", get(posts_count))
        .route("/upload-image/:id", put(update_post_image))
        .route("/like/:id", put(toggle_like))
        .route(
            "/:id",
            get(get_post).put(update_post).delete(delete_post),
        )
}

/// POST /api/posts — multipart body: an `image` part plus the text fields of
/// [`CreatePost`]. The image is mandatory and its upload is fatal on failure.
pub async fn create_post(
    Extension(services): Extension<Arc<AppServices>>,
    identity: IdentityContext,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let (image, fields) = common::image_and_fields(multipart).await?;
    let image = common::require_image(image)?;

    let input = CreatePost {
        title: fields.get("title").cloned().unwrap_or_default(),
        description: fields.get("description").cloned().unwrap_or_default(),
        category: fields.get("category").cloned().unwrap_or_default(),
    };
    check(&input)?;

    let asset = services.media.upload(&image.filename, &image.bytes)?;
    let post = Post::new(identity.user_id(), input, asset);
    services.posts.insert(post.clone())?;

    tracing::info!(post_id = %post.id, author = %post.author, "post created");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "post": dto::post_to_json(&post) })),
    )
        .into_response())
}

/// GET /api/posts — public. `pageNumber` paginates, `category` filters;
/// either, both, or neither may be present.
pub async fn list_posts(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<PostListQuery>,
) -> Result<Response, ApiError> {
    let posts = services
        .posts
        .list(query.page_number, query.category.as_deref())?;
    let body: Vec<_> = posts.iter().map(dto::post_to_json).collect();
    Ok((StatusCode::OK, Json(body)).into_response())
}

/// GET /api/posts/count.
pub async fn posts_count(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Response, ApiError> {
    let count = services.posts.count()?;
    Ok((StatusCode::OK, Json(serde_json::json!(count))).into_response())
}

/// GET /api/posts/:id — public, with the post's comments attached.
pub async fn get_post(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id: PostId = id.parse()?;

    let post = services
        .posts
        .find_by_id(&id)?
        .ok_or(CoreError::not_found("post"))?;

    let mut comments = services.comments.find_by_post(post.id)?;
    comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let mut body = dto::post_to_json(&post);
    body["comments"] = comments.iter().map(dto::comment_to_json).collect();

    Ok((StatusCode::OK, Json(body)).into_response())
}

/// PUT /api/posts/:id — the author only. Admins do not get to rewrite other
/// people's words.
pub async fn update_post(
    Extension(services): Extension<Arc<AppServices>>,
    identity: IdentityContext,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<UpdatePost>,
) -> Result<Response, ApiError> {
    let id: PostId = id.parse()?;
    check(&body)?;

    let post = services
        .posts
        .find_by_id(&id)?
        .ok_or(CoreError::not_found("post"))?;

    authz::ensure_owner(&identity.identity(), post.author)?;

    let updated = services
        .posts
        .update(&id, |post| {
            if let Some(title) = body.title {
                post.title = title;
            }
            if let Some(description) = body.description {
                post.description = description;
            }
            if let Some(category) = body.category {
                post.category = category;
            }
        })?
        .ok_or(CoreError::not_found("post"))?;

    Ok((StatusCode::OK, Json(dto::post_to_json(&updated))).into_response())
}

/// PUT /api/posts/upload-image/:id — the author only. The old image is
/// best-effort cleanup; the new upload is fatal on failure.
pub async fn update_post_image(
    Extension(services): Extension<Arc<AppServices>>,
    identity: IdentityContext,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let id: PostId = id.parse()?;

    let (image, _fields) = common::image_and_fields(multipart).await?;
    let image = common::require_image(image)?;

    let post = services
        .posts
        .find_by_id(&id)?
        .ok_or(CoreError::not_found("post"))?;

    authz::ensure_owner(&identity.identity(), post.author)?;

    if let Some(old) = &post.image.public_id {
        if let Err(e) = services.media.delete(old) {
            tracing::warn!(post_id = %post.id, public_id = %old, error = %e, "failed to remove previous post image");
        }
    }

    let asset = services.media.upload(&image.filename, &image.bytes)?;
    let updated = services
        .posts
        .set_image(&id, asset)?
        .ok_or(CoreError::not_found("post"))?;

    Ok((StatusCode::OK, Json(dto::post_to_json(&updated))).into_response())
}

/// PUT /api/posts/like/:id — any authenticated account. Liking twice takes
/// the like back.
pub async fn toggle_like(
    Extension(services): Extension<Arc<AppServices>>,
    identity: IdentityContext,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id: PostId = id.parse()?;

    let updated = services
        .posts
        .toggle_like(&id, identity.user_id())?
        .ok_or(CoreError::not_found("post"))?;

    Ok((StatusCode::OK, Json(dto::post_to_json(&updated))).into_response())
}

/// DELETE /api/posts/:id — the author or an admin. Comments under the post go
/// with it; the stored image is best-effort cleanup.
pub async fn delete_post(
    Extension(services): Extension<Arc<AppServices>>,
    identity: IdentityContext,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id: PostId = id.parse()?;

    let post = services
        .posts
        .find_by_id(&id)?
        .ok_or(CoreError::not_found("post"))?;

    authz::ensure_owner_or_admin(&identity.identity(), post.author)?;

    if let Some(public_id) = &post.image.public_id {
        if let Err(e) = services.media.delete(public_id) {
            tracing::warn!(post_id = %post.id, public_id = %public_id, error = %e, "failed to remove post image");
        }
    }

    services.posts.delete(&id)?;
    let removed_comments = services.comments.delete_by_post(post.id)?;

    tracing::info!(post_id = %post.id, comments = removed_comments, "post deleted");

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "message": "post has been deleted successfully",
            "postId": post.id,
        })),
    )
        .into_response())
}
