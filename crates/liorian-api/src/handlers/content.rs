//! Public catalog reads. Only visible entries are served.

use axum::Json;
use axum::extract::{Path, State};

use liorian_core::error::AppError;
use liorian_entity::content::{CatalogItem, Course, Post, Service};

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/content/courses
pub async fn list_courses(State(state): State<AppState>) -> Json<ApiResponse<Vec<Course>>> {
    Json(ApiResponse::ok(state.catalog.get_courses().await))
}

/// GET /api/content/courses/{id}
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<Course>>, ApiError> {
    visible(state.catalog.get_course_by_id(id).await, id)
}

/// GET /api/content/services
pub async fn list_services(State(state): State<AppState>) -> Json<ApiResponse<Vec<Service>>> {
    Json(ApiResponse::ok(state.catalog.get_services().await))
}

/// GET /api/content/services/{id}
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<Service>>, ApiError> {
    visible(state.catalog.get_service_by_id(id).await, id)
}

/// GET /api/content/posts
pub async fn list_posts(State(state): State<AppState>) -> Json<ApiResponse<Vec<Post>>> {
    Json(ApiResponse::ok(state.catalog.get_posts().await))
}

/// GET /api/content/posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<Post>>, ApiError> {
    visible(state.catalog.get_post_by_id(id).await, id)
}

fn visible<T: CatalogItem + serde::Serialize>(
    item: Option<T>,
    id: u64,
) -> Result<Json<ApiResponse<T>>, ApiError> {
    match item {
        Some(item) if item.is_visible() => Ok(Json(ApiResponse::ok(item))),
        _ => Err(AppError::not_found(format!("No entry {id} in {}", T::COLLECTION)).into()),
    }
}
