//! Careers form submissions.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::info;
use uuid::Uuid;

use liorian_entity::inbox::Application;

use crate::dto::request::ApplicationRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /api/applications
pub async fn submit_application(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ApplicationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Application>>), ApiError> {
    let application = Application {
        id: Uuid::new_v4(),
        name: req.name.trim().to_string(),
        email: req.email.trim().to_lowercase(),
        phone: req.phone.unwrap_or_default(),
        position: req.position.unwrap_or_default(),
        message: req.message.unwrap_or_default(),
        submitted_at: state.clock.now(),
    };

    let stored = application.clone();
    state
        .applications
        .modify(move |applications| {
            applications.push(stored);
            Ok(())
        })
        .await?;

    info!(
        application_id = %application.id,
        position = %application.position,
        "Application received"
    );
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(application))))
}

/// GET /api/admin/applications
pub async fn list_applications(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Application>>>, ApiError> {
    Ok(Json(ApiResponse::ok(state.applications.load().await?)))
}
