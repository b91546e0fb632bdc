use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Multipart, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use quill_core::{CoreError, UserId};
use quill_domain::{UpdateProfile, check};
use quill_infra::hash_password;

use crate::app::routes::common;
use crate::app::{dto, errors::ApiError, extract::ApiJson, services::AppServices};
use crate::authz;
use crate::context::{AdminContext, IdentityContext};

pub fn router() -> Router {
    Router::new()
        .route("/profile", get(list_users))
        .route("/profile/count", get(users_count))
        .route("/profile/profile-photo-upload", post(upload_profile_photo))
        .route(
            "/profile/:id",
            get(get_profile).put(update_profile).delete(delete_profile),
        )
}

/// GET /api/users/profile, admin only.
pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    _admin: AdminContext,
) -> Result<Response, ApiError> {
    let users = services.users.list_non_admin()?;
    let body: Vec<_> = users.iter().map(dto::user_to_json).collect();
    Ok((StatusCode::OK, Json(body)).into_response())
}

/// GET /api/users/profile/count, admin only.
pub async fn users_count(
    Extension(services): Extension<Arc<AppServices>>,
    _admin: AdminContext,
) -> Result<Response, ApiError> {
    let count = services.users.count()?;
    Ok((StatusCode::OK, Json(serde_json::json!(count))).into_response())
}

/// GET /api/users/profile/:id is public and carries the account's posts.
pub async fn get_profile(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id: UserId = id.parse()?;

    let user = services
        .users
        .find_by_id(&id)?
        .ok_or(CoreError::not_found("user"))?;

    let mut posts = services.posts.find_by_author(user.id)?;
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let mut body = dto::user_to_json(&user);
    body["posts"] = posts.iter().map(dto::post_to_json).collect();

    Ok((StatusCode::OK, Json(serde_json::json!({ "user": body }))).into_response())
}

/// PUT /api/users/profile/:id — the account itself only.
pub async fn update_profile(
    Extension(services): Extension<Arc<AppServices>>,
    identity: IdentityContext,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<UpdateProfile>,
) -> Result<Response, ApiError> {
    let id: UserId = id.parse()?;
    check(&body)?;

    if services.users.find_by_id(&id)?.is_none() {
        return Err(CoreError::not_found("user").into());
    }

    // Profile edits are self-only; no moderator bypass.
    authz::ensure_owner(&identity.identity(), id)?;

    let password_hash = match &body.password {
        Some(password) => Some(hash_password(password)?),
        None => None,
    };

    let updated = services
        .users
        .update(&id, |user| {
            if let Some(username) = body.username {
                user.username = username;
            }
            if let Some(hash) = password_hash {
                user.password_hash = hash;
            }
            if let Some(bio) = body.bio {
                user.bio = Some(bio);
            }
        })?
        .ok_or(CoreError::not_found("user"))?;

    Ok((StatusCode::OK, Json(dto::user_to_json(&updated))).into_response())
}

/// POST /api/users/profile/profile-photo-upload — any authenticated account,
/// always its own photo.
pub async fn upload_profile_photo(
    Extension(services): Extension<Arc<AppServices>>,
    identity: IdentityContext,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let (image, _fields) = common::image_and_fields(multipart).await?;
    let image = image.ok_or_else(|| CoreError::invalid_input("no file provided"))?;

    let user = services
        .users
        .find_by_id(&identity.user_id())?
        .ok_or(CoreError::not_found("user"))?;

    let asset = services.media.upload(&image.filename, &image.bytes)?;

    // Replacement: the old photo is best-effort cleanup, not part of the
    // request's success.
    if let Some(old) = &user.profile_photo.public_id {
        if let Err(e) = services.media.delete(old) {
            tracing::warn!(public_id = %old, error = %e, "failed to remove previous profile photo");
        }
    }

    let updated = services
        .users
        .update(&user.id, |u| u.profile_photo = asset.clone())?
        .ok_or(CoreError::not_found("user"))?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "profile photo added successfully",
            "profilePhoto": updated.profile_photo,
        })),
    )
        .into_response())
}

/// DELETE /api/users/profile/:id — the account itself or an admin.
///
/// Cascades: the user's post images and profile photo (best-effort), every
/// post and comment they authored, then the account record.
pub async fn delete_profile(
    Extension(services): Extension<Arc<AppServices>>,
    identity: IdentityContext,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id: UserId = id.parse()?;

    let user = services
        .users
        .find_by_id(&id)?
        .ok_or(CoreError::not_found("user"))?;

    authz::ensure_self_or_admin(&identity.identity(), user.id)?;

    let posts = services.posts.find_by_author(user.id)?;
    let public_ids: Vec<String> = posts
        .iter()
        .filter_map(|p| p.image.public_id.clone())
        .collect();

    if !public_ids.is_empty() {
        if let Err(e) = services.media.delete_many(&public_ids) {
            tracing::warn!(user_id = %user.id, error = %e, "failed to remove post images during account deletion");
        }
    }
    if let Some(photo) = &user.profile_photo.public_id {
        if let Err(e) = services.media.delete(photo) {
            tracing::warn!(user_id = %user.id, error = %e, "failed to remove profile photo during account deletion");
        }
    }

    let removed_posts = services.posts.delete_by_author(user.id)?;
    let removed_comments = services.comments.delete_by_author(user.id)?;
    services.users.delete(&user.id)?;

    tracing::info!(
        user_id = %user.id,
        posts = removed_posts.len(),
        comments = removed_comments,
        "account deleted"
    );

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "message": "your profile has been deleted" })),
    )
        .into_response())
}
