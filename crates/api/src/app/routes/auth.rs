use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;

use quill_auth::TokenSigner;
use quill_core::CoreError;
use quill_domain::{LoginUser, RegisterUser, User, check};
use quill_infra::{hash_password, verify_password};

use crate::app::{dto, errors::ApiError, extract::ApiJson, services::AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    ApiJson(body): ApiJson<RegisterUser>,
) -> Result<Response, ApiError> {
    check(&body)?;

    if services.users.find_by_email(&body.email)?.is_some()
        || services.users.find_by_username(&body.username)?.is_some()
    {
        return Err(CoreError::invalid_input("user already exists").into());
    }

    let password_hash = hash_password(&body.password)?;
    let user = User::new(body.username, body.email, password_hash);
    services.users.insert(user.clone())?;

    tracing::info!(user_id = %user.id, "account registered");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "you registered successfully, please log in",
            "user": dto::user_to_json(&user),
        })),
    )
        .into_response())
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    ApiJson(body): ApiJson<LoginUser>,
) -> Result<Response, ApiError> {
    check(&body)?;

    // One failure message for unknown email and wrong password alike.
    let user = services
        .users
        .find_by_email(&body.email)?
        .ok_or_else(|| CoreError::invalid_input("invalid email or password"))?;

    if !verify_password(&body.password, &user.password_hash)? {
        return Err(CoreError::invalid_input("invalid email or password").into());
    }

    let token = services
        .tokens
        .sign(user.id, user.is_admin, Utc::now())
        .map_err(|e| CoreError::unavailable(e.to_string()))?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "token": token,
            "user": dto::user_to_json(&user),
        })),
    )
        .into_response())
}
