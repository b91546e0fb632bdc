use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use quill_core::CoreError;
use quill_infra::{MediaError, PasswordError, StoreError};

/// API-level error: a [`CoreError`] that knows how to render itself.
///
/// Every handler returns `Result<Response, ApiError>`; `?` converts the
/// collaborator error types below, so status mapping lives in exactly one
/// place.
#[derive(Debug)]
pub struct ApiError(CoreError);

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(CoreError::unavailable(err.to_string()))
    }
}

impl From<MediaError> for ApiError {
    fn from(err: MediaError) -> Self {
        Self(CoreError::unavailable(err.to_string()))
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        Self(CoreError::unavailable(err.to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self.0 {
            CoreError::Unauthenticated(_) => (StatusCode::UNAUTHORIZED, "unauthenticated"),
            CoreError::InvalidCredential(_) => (StatusCode::FORBIDDEN, "invalid_credential"),
            CoreError::Forbidden => (StatusCode::FORBIDDEN, "forbidden"),
            CoreError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "invalid_input"),
            CoreError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            CoreError::CollaboratorUnavailable(_) => {
                (StatusCode::BAD_GATEWAY, "collaborator_unavailable")
            }
        };

        json_error(status, code, self.0.to_string())
    }
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
