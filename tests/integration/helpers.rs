//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use liorian_api::AppState;
use liorian_auth::NewSystemUser;
use liorian_content::ContentCatalog;
use liorian_core::config::AppConfig;
use liorian_core::traits::{KeyValueStore, ManualClock};
use liorian_entity::user::{SystemUser, UserType};
use liorian_storage::{MemoryKvStore, MemoryObjectStore, SerializedStore};
use liorian_training::TrainingStore;

/// Password given to every user created by [`TestApp::create_user`].
pub const PASSWORD: &str = "Training2024";

/// Test application context
pub struct TestApp {
    /// The Axum app for making test requests
    pub router: Router,
    /// State behind the router
    pub state: AppState,
    /// Clock shared by every store
    pub clock: ManualClock,
}

impl TestApp {
    /// Create a test application over in-memory stores
    pub async fn new() -> Self {
        let config = AppConfig::default();
        let clock = ManualClock::default();

        let kv: Arc<dyn KeyValueStore> =
            Arc::new(SerializedStore::spawn(Arc::new(MemoryKvStore::new())));
        let catalog = Arc::new(
            ContentCatalog::load(kv.clone(), config.content.clone())
                .await
                .expect("Failed to load catalog"),
        );
        let objects = Arc::new(MemoryObjectStore::with_clock(
            "liorian-test",
            Arc::new(clock.clone()),
        ));
        let training = Arc::new(TrainingStore::new(objects, Arc::new(clock.clone())));

        let state = AppState::new(config, kv, catalog, training, Arc::new(clock.clone()));
        let router = liorian_api::build_app(state.clone());

        Self {
            router,
            state,
            clock,
        }
    }

    /// Create a system user with [`PASSWORD`]
    pub async fn create_user(&self, email: &str, user_type: UserType) -> SystemUser {
        self.state
            .credentials
            .add_user(NewSystemUser {
                email: email.to_string(),
                name: "Test User".to_string(),
                user_type,
                password: PASSWORD.to_string(),
            })
            .await
            .expect("Failed to create test user")
    }

    /// Log in through `path` and return the token
    pub async fn login(&self, path: &str, email: &str) -> String {
        let response = self
            .request(
                "POST",
                path,
                Some(serde_json::json!({ "email": email, "password": PASSWORD })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.body["data"]["token"]
            .as_str()
            .expect("No token in login response")
            .to_string()
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body = body
            .map(|b| serde_json::to_vec(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.send(method, path, body, "application/json", token).await
    }

    /// Make a request with a raw body
    pub async fn send(
        &self,
        method: &str,
        path: &str,
        body: Vec<u8>,
        content_type: &str,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", content_type);

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
