use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
};

use quill_core::{CategoryId, CoreError};
use quill_domain::{Category, CreateCategory, check};

use crate::app::{dto, errors::ApiError, extract::ApiJson, services::AppServices};
use crate::context::AdminContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route("/:id", delete(delete_category))
}

/// POST /api/categories, admin only.
pub async fn create_category(
    Extension(services): Extension<Arc<AppServices>>,
    admin: AdminContext,
    ApiJson(body): ApiJson<CreateCategory>,
) -> Result<Response, ApiError> {
    check(&body)?;

    let category = Category::new(admin.user_id(), body.title);
    services.categories.insert(category.clone())?;

    Ok((StatusCode::CREATED, Json(dto::category_to_json(&category))).into_response())
}

/// GET /api/categories, open to anyone.
pub async fn list_categories(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Response, ApiError> {
    let categories = services.categories.list()?;
    let body: Vec<_> = categories.iter().map(dto::category_to_json).collect();
    Ok((StatusCode::OK, Json(body)).into_response())
}

/// DELETE /api/categories/:id, admin only.
pub async fn delete_category(
    Extension(services): Extension<Arc<AppServices>>,
    _admin: AdminContext,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id: CategoryId = id.parse()?;

    services
        .categories
        .delete(&id)?
        .ok_or(CoreError::not_found("category"))?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "message": "category has been deleted",
            "categoryId": id,
        })),
    )
        .into_response())
}
