//! Integration tests for newsletter, applications and the public catalog.

mod helpers;

use http::StatusCode;
use serde_json::json;

const TOKEN: &str = "admin-token";

#[tokio::test]
async fn test_subscribe_list_and_remove() {
    let app = helpers::TestApp::new().await;

    let created = app
        .request(
            "POST",
            "/api/newsletter/subscribe",
            Some(json!({ "email": "Reader@Example.com", "name": "Reader", "source": "footer" })),
            None,
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["data"]["email"], "reader@example.com");

    let duplicate = app
        .request(
            "POST",
            "/api/newsletter/subscribe",
            Some(json!({ "email": "reader@example.com" })),
            None,
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
    assert_eq!(duplicate.body["success"], false);

    let listed = app
        .request("GET", "/api/admin/newsletter/subscribers", None, Some(TOKEN))
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["data"].as_array().unwrap().len(), 1);
    assert_eq!(listed.body["data"][0]["source"], "footer");

    let removed = app
        .request(
            "DELETE",
            "/api/admin/newsletter/subscribers/reader@example.com",
            None,
            Some(TOKEN),
        )
        .await;
    assert_eq!(removed.status, StatusCode::OK);

    let missing = app
        .request(
            "DELETE",
            "/api/admin/newsletter/subscribers/reader@example.com",
            None,
            Some(TOKEN),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_subscription_email() {
    let app = helpers::TestApp::new().await;
    let response = app
        .request(
            "POST",
            "/api/newsletter/subscribe",
            Some(json!({ "email": "nope" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "A valid email is required");
}

#[tokio::test]
async fn test_send_newsletter_counts_recipients() {
    let app = helpers::TestApp::new().await;
    let send = json!({ "subject": "Spring intake", "content": "Courses start in April." });

    let none = app
        .request("POST", "/api/admin/newsletter/send", Some(send.clone()), Some(TOKEN))
        .await;
    assert_eq!(none.status, StatusCode::BAD_REQUEST);

    for email in ["a@example.com", "b@example.com", "c@example.com"] {
        app.request(
            "POST",
            "/api/newsletter/subscribe",
            Some(json!({ "email": email })),
            None,
        )
        .await;
    }

    let sent = app
        .request("POST", "/api/admin/newsletter/send", Some(send), Some(TOKEN))
        .await;
    assert_eq!(sent.status, StatusCode::OK);
    assert_eq!(sent.body["data"]["recipients"], 3);

    let campaigns = app
        .request("GET", "/api/admin/newsletter/campaigns", None, Some(TOKEN))
        .await;
    assert_eq!(campaigns.body["data"][0]["subject"], "Spring intake");
}

#[tokio::test]
async fn test_submit_application() {
    let app = helpers::TestApp::new().await;

    let submitted = app
        .request(
            "POST",
            "/api/applications",
            Some(json!({
                "name": "Ana Smith",
                "email": "ana@example.com",
                "position": "Cloud Engineering Bootcamp",
                "message": "I would like to join.",
            })),
            None,
        )
        .await;
    assert_eq!(submitted.status, StatusCode::CREATED);
    assert!(submitted.body["data"]["id"].as_str().is_some());

    let listed = app
        .request("GET", "/api/admin/applications", None, Some(TOKEN))
        .await;
    assert_eq!(listed.body["data"].as_array().unwrap().len(), 1);

    let invalid = app
        .request(
            "POST",
            "/api/applications",
            Some(json!({ "name": "", "email": "ana@example.com" })),
            None,
        )
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_public_catalog_hides_inactive() {
    let app = helpers::TestApp::new().await;

    let courses = app.request("GET", "/api/content/courses", None, None).await;
    assert_eq!(courses.status, StatusCode::OK);
    let first_id = courses.body["data"][0]["id"].as_u64().unwrap();

    app.state
        .catalog
        .update_course(first_id, &json!({ "status": "Inactive" }))
        .await
        .unwrap();

    let hidden = app
        .request("GET", &format!("/api/content/courses/{first_id}"), None, None)
        .await;
    assert_eq!(hidden.status, StatusCode::NOT_FOUND);

    let after = app.request("GET", "/api/content/courses", None, None).await;
    let ids: Vec<u64> = after.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|c| c["id"].as_u64())
        .collect();
    assert!(!ids.contains(&first_id));

    let posts = app.request("GET", "/api/content/posts", None, None).await;
    assert!(!posts.body["data"].as_array().unwrap().is_empty());
}
