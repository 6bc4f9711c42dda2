//! Route definitions for the Liorian HTTP API.
//!
//! All routes are mounted under `/api`. Admin and training routes sit
//! behind the bearer gate; everything else is public.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes, the body limit and request logging.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes;

    let api_routes = Router::new()
        .merge(public_routes())
        .merge(protected_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Health, logins, forms and the public catalog.
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/candidates/login", post(handlers::auth::candidate_login))
        .route("/staff-auth/login", post(handlers::auth::staff_login))
        .route(
            "/applications",
            post(handlers::applications::submit_application),
        )
        .route("/newsletter/subscribe", post(handlers::newsletter::subscribe))
        .route("/content/courses", get(handlers::content::list_courses))
        .route("/content/courses/{id}", get(handlers::content::get_course))
        .route("/content/services", get(handlers::content::list_services))
        .route("/content/services/{id}", get(handlers::content::get_service))
        .route("/content/posts", get(handlers::content::list_posts))
        .route("/content/posts/{id}", get(handlers::content::get_post))
}

/// Routes that need `Authorization: Bearer <token>`.
fn protected_routes() -> Router<AppState> {
    Router::new()
        .merge(admin_routes())
        .merge(training_routes())
        .route_layer(axum_middleware::from_fn(middleware::require_bearer))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/newsletter/subscribers",
            get(handlers::newsletter::list_subscribers),
        )
        .route(
            "/admin/newsletter/subscribers/{email}",
            delete(handlers::newsletter::remove_subscriber),
        )
        .route(
            "/admin/newsletter/send",
            post(handlers::newsletter::send_newsletter),
        )
        .route(
            "/admin/newsletter/campaigns",
            get(handlers::newsletter::list_campaigns),
        )
        .route(
            "/admin/applications",
            get(handlers::applications::list_applications),
        )
}

fn training_routes() -> Router<AppState> {
    Router::new()
        .route("/training/progress", post(handlers::training::save_progress))
        .route(
            "/training/progress/{user_id}",
            get(handlers::training::get_user_progress),
        )
        .route(
            "/training/quiz-results",
            post(handlers::training::save_quiz_result),
        )
        .route(
            "/training/quiz-results/{user_id}",
            get(handlers::training::get_quiz_results),
        )
        .route("/training/reports", post(handlers::training::save_report))
        .route(
            "/training/reports/pdf/{user_id}/{report_type}",
            post(handlers::training::save_pdf_report),
        )
        .route(
            "/training/admin/all-users",
            get(handlers::training::all_users),
        )
        .route("/training/admin/cleanup", post(handlers::training::cleanup))
        .route("/training/health", get(handlers::training::storage_health))
        .route(
            "/training/modules",
            get(handlers::training::list_modules).put(handlers::training::replace_modules),
        )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use liorian_content::ContentCatalog;
    use liorian_core::config::AppConfig;
    use liorian_core::traits::ManualClock;
    use liorian_storage::{MemoryKvStore, MemoryObjectStore, SerializedStore};
    use liorian_training::TrainingStore;

    use super::*;

    fn state() -> AppState {
        let config = AppConfig::default();
        let clock = Arc::new(ManualClock::default());
        let kv = Arc::new(SerializedStore::spawn(Arc::new(MemoryKvStore::new())));
        let catalog = Arc::new(ContentCatalog::new(kv.clone(), config.content.clone()));
        let objects = Arc::new(MemoryObjectStore::with_clock("test", clock.clone()));
        let training = Arc::new(TrainingStore::new(objects, clock.clone()));
        AppState::new(config, kv, catalog, training, clock)
    }

    async fn get(uri: &str, token: Option<&str>) -> (StatusCode, serde_json::Value) {
        let mut request = Request::builder().uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let response = build_router(state())
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_protected_route_without_token() {
        let (status, body) = get("/api/training/health", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            body,
            serde_json::json!({"success": false, "error": "Access denied. No token provided."})
        );
    }

    #[tokio::test]
    async fn test_protected_route_with_token() {
        let (status, body) = get("/api/training/health", Some("anything")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "connected");
        assert_eq!(body["data"]["provider"], "memory");
    }

    #[tokio::test]
    async fn test_public_routes_need_no_token() {
        let (status, body) = get("/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "ok");

        let (status, body) = get("/api/content/courses", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"].as_array().is_some_and(|c| !c.is_empty()));
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let (status, _) = get("/api/nope", Some("t")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
