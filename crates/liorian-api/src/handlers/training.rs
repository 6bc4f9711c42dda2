//! Training records on the object store.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use bytes::Bytes;
use serde_json::Value;
use tracing::{error, info};

use liorian_core::error::AppError;
use liorian_entity::training::{ProgressRecord, QuizResult, TrainingReport, UserTrainingData};
use liorian_training::SavedObject;

use crate::dto::request::{CleanupQuery, ProgressQuery, QuizQuery};
use crate::dto::response::{ApiResponse, CleanupResponse, StorageHealthResponse};
use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiQuery};
use crate::state::AppState;

type Saved = (StatusCode, Json<ApiResponse<SavedObject>>);

fn created(saved: SavedObject) -> Saved {
    (StatusCode::CREATED, Json(ApiResponse::ok(saved)))
}

/// POST /api/training/progress
pub async fn save_progress(
    State(state): State<AppState>,
    ApiJson(record): ApiJson<ProgressRecord>,
) -> Result<Saved, ApiError> {
    Ok(created(state.training.save_progress(&record).await?))
}

/// POST /api/training/quiz-results
pub async fn save_quiz_result(
    State(state): State<AppState>,
    ApiJson(result): ApiJson<QuizResult>,
) -> Result<Saved, ApiError> {
    Ok(created(state.training.save_quiz_result(&result).await?))
}

/// POST /api/training/reports
pub async fn save_report(
    State(state): State<AppState>,
    ApiJson(report): ApiJson<TrainingReport>,
) -> Result<Saved, ApiError> {
    Ok(created(state.training.save_report(&report).await?))
}

/// POST /api/training/reports/pdf/{user_id}/{report_type}
///
/// The request body is the PDF itself.
pub async fn save_pdf_report(
    State(state): State<AppState>,
    Path((user_id, report_type)): Path<(String, String)>,
    body: Bytes,
) -> Result<Saved, ApiError> {
    let saved = state
        .training
        .save_pdf_report(&user_id, &report_type, body)
        .await?;
    Ok(created(saved))
}

/// GET /api/training/progress/{user_id}?courseId=
pub async fn get_user_progress(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    ApiQuery(query): ApiQuery<ProgressQuery>,
) -> Result<Json<ApiResponse<Vec<ProgressRecord>>>, ApiError> {
    let progress = state
        .training
        .get_user_progress(&user_id, query.course_id.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok(progress)))
}

/// GET /api/training/quiz-results/{user_id}?courseId=&moduleId=
pub async fn get_quiz_results(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    ApiQuery(query): ApiQuery<QuizQuery>,
) -> Result<Json<ApiResponse<Vec<QuizResult>>>, ApiError> {
    let results = state
        .training
        .get_quiz_results(
            &user_id,
            query.course_id.as_deref(),
            query.module_id.as_deref(),
        )
        .await?;
    Ok(Json(ApiResponse::ok(results)))
}

/// GET /api/training/admin/all-users
pub async fn all_users(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<BTreeMap<String, UserTrainingData>>>, ApiError> {
    Ok(Json(ApiResponse::ok(
        state.training.get_all_users_training_data().await?,
    )))
}

/// GET /api/training/health
pub async fn storage_health(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<StorageHealthResponse>>, ApiError> {
    let provider = state.training.provider_type().to_string();
    if let Err(e) = state.training.test_connection().await {
        error!(%provider, error = %e, "Object store health check failed");
        return Err(e.into());
    }
    Ok(Json(ApiResponse::ok(StorageHealthResponse {
        status: "connected".to_string(),
        provider,
    })))
}

/// GET /api/training/modules
pub async fn list_modules(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Value>>>, ApiError> {
    Ok(Json(ApiResponse::ok(state.modules.load().await?)))
}

/// PUT /api/training/modules
///
/// Replaces the whole module list.
pub async fn replace_modules(
    State(state): State<AppState>,
    ApiJson(modules): ApiJson<Vec<Value>>,
) -> Result<Json<ApiResponse<Vec<Value>>>, ApiError> {
    if modules.iter().any(|m| !m.is_object()) {
        return Err(AppError::validation("Every training module must be a JSON object").into());
    }
    let stored = modules.clone();
    state
        .modules
        .modify(move |current| {
            *current = stored;
            Ok(())
        })
        .await?;
    info!(count = modules.len(), "Training modules replaced");
    Ok(Json(ApiResponse::ok(modules)))
}

/// POST /api/training/admin/cleanup?daysOld=
pub async fn cleanup(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CleanupQuery>,
) -> Result<Json<ApiResponse<CleanupResponse>>, ApiError> {
    let days_old = query
        .days_old
        .unwrap_or(state.config.content.training_retention_days);
    let deleted = state.training.cleanup_old_training_data(days_old).await?;
    info!(days_old, deleted, "Training cleanup requested");
    Ok(Json(ApiResponse::ok(CleanupResponse { deleted, days_old })))
}
