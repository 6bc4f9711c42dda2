//! Integration tests for the training routes.

mod helpers;

use http::StatusCode;
use serde_json::json;

const TOKEN: &str = "test-token";

fn progress(user: &str, course: &str, module: &str, pct: u32) -> serde_json::Value {
    json!({
        "userId": user,
        "courseId": course,
        "moduleId": module,
        "progress": pct,
        "completed": pct == 100,
        "timeSpent": 600,
        "notes": "kept as sent",
    })
}

#[tokio::test]
async fn test_requires_bearer_token() {
    let app = helpers::TestApp::new().await;

    for (method, path) in [
        ("GET", "/api/training/health"),
        ("POST", "/api/training/progress"),
        ("GET", "/api/training/progress/u1"),
        ("GET", "/api/training/admin/all-users"),
        ("GET", "/api/admin/newsletter/subscribers"),
    ] {
        let response = app.request(method, path, None, None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{method} {path}");
        assert_eq!(
            response.body,
            json!({ "success": false, "error": "Access denied. No token provided." })
        );
    }

    let response = app
        .send("GET", "/api/training/health", Vec::new(), "application/json", Some(""))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_progress_round_trip() {
    let app = helpers::TestApp::new().await;

    let saved = app
        .request(
            "POST",
            "/api/training/progress",
            Some(progress("u1", "c1", "m1", 50)),
            Some(TOKEN),
        )
        .await;
    assert_eq!(saved.status, StatusCode::CREATED);
    let key = saved.body["data"]["key"].as_str().unwrap();
    assert!(key.starts_with("training-progress/u1/c1/m1/"));
    assert!(key.ends_with(".json"));

    app.clock.advance(chrono::Duration::seconds(1));
    app.request(
        "POST",
        "/api/training/progress",
        Some(progress("u1", "c2", "m1", 100)),
        Some(TOKEN),
    )
    .await;

    let all = app
        .request("GET", "/api/training/progress/u1", None, Some(TOKEN))
        .await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.body["data"].as_array().unwrap().len(), 2);

    let one = app
        .request(
            "GET",
            "/api/training/progress/u1?courseId=c1",
            None,
            Some(TOKEN),
        )
        .await;
    let records = one.body["data"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["progress"], 50.0);
    assert_eq!(records[0]["notes"], "kept as sent");

    let unfiltered = app
        .request(
            "GET",
            "/api/training/progress/u1?courseId=",
            None,
            Some(TOKEN),
        )
        .await;
    assert_eq!(unfiltered.status, StatusCode::OK);
    assert_eq!(unfiltered.body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_quiz_results_and_all_users() {
    let app = helpers::TestApp::new().await;

    let quiz = json!({
        "userId": "u2",
        "courseId": "c1",
        "moduleId": "m3",
        "score": 8,
        "totalQuestions": 10,
        "passed": true,
        "answers": [1, 2, 3],
    });
    let saved = app
        .request("POST", "/api/training/quiz-results", Some(quiz), Some(TOKEN))
        .await;
    assert_eq!(saved.status, StatusCode::CREATED);

    app.request(
        "POST",
        "/api/training/progress",
        Some(progress("u1", "c1", "m1", 20)),
        Some(TOKEN),
    )
    .await;

    let filtered = app
        .request(
            "GET",
            "/api/training/quiz-results/u2?courseId=c1&moduleId=m3",
            None,
            Some(TOKEN),
        )
        .await;
    assert_eq!(filtered.body["data"].as_array().unwrap().len(), 1);

    let blank_module = app
        .request(
            "GET",
            "/api/training/quiz-results/u2?courseId=c1&moduleId=",
            None,
            Some(TOKEN),
        )
        .await;
    assert_eq!(blank_module.body["data"].as_array().unwrap().len(), 1);

    let everyone = app
        .request("GET", "/api/training/admin/all-users", None, Some(TOKEN))
        .await;
    assert_eq!(everyone.status, StatusCode::OK);
    let data = everyone.body["data"].as_object().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data["u1"]["progress"].as_array().unwrap().len(), 1);
    assert_eq!(data["u2"]["quizResults"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_reports_json_and_pdf() {
    let app = helpers::TestApp::new().await;

    let report = app
        .request(
            "POST",
            "/api/training/reports",
            Some(json!({ "userId": "u1", "reportType": "monthly", "data": { "hours": 12 } })),
            Some(TOKEN),
        )
        .await;
    assert_eq!(report.status, StatusCode::CREATED);
    assert!(
        report.body["data"]["key"]
            .as_str()
            .unwrap()
            .starts_with("training-reports/u1/monthly/")
    );

    let pdf = app
        .send(
            "POST",
            "/api/training/reports/pdf/u1/certificate",
            b"%PDF-1.4 test".to_vec(),
            "application/pdf",
            Some(TOKEN),
        )
        .await;
    assert_eq!(pdf.status, StatusCode::CREATED);
    let key = pdf.body["data"]["key"].as_str().unwrap();
    assert!(key.starts_with("training-reports/pdf/u1/certificate-"));
    assert!(key.ends_with(".pdf"));
    assert!(pdf.body["data"]["url"].as_str().unwrap().contains(key));

    let empty = app
        .send(
            "POST",
            "/api/training/reports/pdf/u1/certificate",
            Vec::new(),
            "application/pdf",
            Some(TOKEN),
        )
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_record_is_bad_request() {
    let app = helpers::TestApp::new().await;
    let response = app
        .request(
            "POST",
            "/api/training/progress",
            Some(json!({ "courseId": "c1" })),
            Some(TOKEN),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], false);
}

#[tokio::test]
async fn test_health_and_cleanup() {
    let app = helpers::TestApp::new().await;

    let health = app
        .request("GET", "/api/training/health", None, Some(TOKEN))
        .await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["data"]["status"], "connected");

    app.request(
        "POST",
        "/api/training/progress",
        Some(progress("u1", "c1", "m1", 10)),
        Some(TOKEN),
    )
    .await;
    app.clock.advance(chrono::Duration::days(40));
    app.request(
        "POST",
        "/api/training/progress",
        Some(progress("u1", "c1", "m2", 10)),
        Some(TOKEN),
    )
    .await;

    let cleanup = app
        .request(
            "POST",
            "/api/training/admin/cleanup?daysOld=30",
            None,
            Some(TOKEN),
        )
        .await;
    assert_eq!(cleanup.status, StatusCode::OK);
    assert_eq!(cleanup.body["data"]["deleted"], 1);
    assert_eq!(cleanup.body["data"]["daysOld"], 30);

    let left = app
        .request("GET", "/api/training/progress/u1", None, Some(TOKEN))
        .await;
    assert_eq!(left.body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_training_modules_replace_and_list() {
    let app = helpers::TestApp::new().await;

    let empty = app
        .request("GET", "/api/training/modules", None, Some(TOKEN))
        .await;
    assert_eq!(empty.body["data"], json!([]));

    let modules = json!([
        { "id": 1, "title": "Linux Fundamentals", "courseId": "c1" },
        { "id": 2, "title": "Networking Basics", "courseId": "c1" },
    ]);
    let replaced = app
        .request("PUT", "/api/training/modules", Some(modules.clone()), Some(TOKEN))
        .await;
    assert_eq!(replaced.status, StatusCode::OK);

    let listed = app
        .request("GET", "/api/training/modules", None, Some(TOKEN))
        .await;
    assert_eq!(listed.body["data"], modules);

    let invalid = app
        .request("PUT", "/api/training/modules", Some(json!([1, 2])), Some(TOKEN))
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
}
