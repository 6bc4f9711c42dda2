//! Login handlers for candidates and for staff/admins.

use axum::Json;
use axum::extract::State;

use liorian_entity::user::UserType;

use crate::dto::request::LoginRequest;
use crate::dto::response::{ApiResponse, LoginResponse};
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /api/candidates/login
pub async fn candidate_login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    login(&state, &req, &[UserType::Candidate]).await
}

/// POST /api/staff-auth/login
pub async fn staff_login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    login(&state, &req, &[UserType::Staff, UserType::Admin]).await
}

async fn login(
    state: &AppState,
    req: &LoginRequest,
    allowed: &[UserType],
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let grant = state
        .credentials
        .authenticate(&req.email, &req.password, allowed)
        .await?;

    let user_type = grant.user.user_type;
    Ok(Json(ApiResponse::ok(LoginResponse {
        token: grant.token,
        user: grant.user,
        user_type,
        redirect_to: user_type.dashboard_route().to_string(),
    })))
}
