//! Integration tests for the login endpoints.

mod helpers;

use http::StatusCode;
use serde_json::json;

use liorian_entity::user::UserType;

const INVALID: &str = "Invalid email or password";

#[tokio::test]
async fn test_staff_login_success() {
    let app = helpers::TestApp::new().await;
    app.create_user("staff@liorian.com", UserType::Staff).await;

    let response = app
        .request(
            "POST",
            "/api/staff-auth/login",
            Some(json!({ "email": "staff@liorian.com", "password": helpers::PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["userType"], "staff");
    assert_eq!(response.body["data"]["user"]["email"], "staff@liorian.com");
    assert!(response.body["data"]["user"].get("passwordHash").is_none());
    assert!(
        response.body["data"]["token"]
            .as_str()
            .is_some_and(|t| !t.is_empty())
    );
}

#[tokio::test]
async fn test_admin_uses_staff_login() {
    let app = helpers::TestApp::new().await;
    app.create_user("admin@liorian.com", UserType::Admin).await;

    let token = app.login("/api/staff-auth/login", "admin@liorian.com").await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_candidate_login() {
    let app = helpers::TestApp::new().await;
    app.create_user("cand@example.com", UserType::Candidate).await;

    let response = app
        .request(
            "POST",
            "/api/candidates/login",
            Some(json!({ "email": "cand@example.com", "password": helpers::PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["userType"], "candidate");
}

#[tokio::test]
async fn test_login_failures_are_generic() {
    let app = helpers::TestApp::new().await;
    app.create_user("staff@liorian.com", UserType::Staff).await;

    let attempts = [
        ("/api/staff-auth/login", "staff@liorian.com", "wrong-password1"),
        ("/api/staff-auth/login", "nobody@liorian.com", helpers::PASSWORD),
        ("/api/candidates/login", "staff@liorian.com", helpers::PASSWORD),
    ];

    for (path, email, password) in attempts {
        let response = app
            .request(
                "POST",
                path,
                Some(json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{path} {email}");
        assert_eq!(response.body["success"], false);
        assert_eq!(response.body["error"], INVALID);
    }
}

#[tokio::test]
async fn test_login_validation() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/candidates/login",
            Some(json!({ "email": "not-an-email", "password": "" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], false);

    let response = app
        .request("POST", "/api/candidates/login", Some(json!({})), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
