//! Request-body extraction with API-shaped rejections.

use axum::{
    async_trait,
    extract::{FromRequest, Request, rejection::JsonRejection},
};

use quill_core::CoreError;

use crate::app::errors::ApiError;

/// JSON body extractor whose rejection is the API's own invalid-input
/// response.
///
/// axum's `Json` answers a missing field or malformed body with a plain-text
/// 422; this wrapper keeps body-shape failures on the same path as
/// validation, so the first step of every handler owns all input errors.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                ApiError::from(CoreError::invalid_input(rejection.body_text()))
            })?;
        Ok(Self(value))
    }
}
