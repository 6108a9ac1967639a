//! E2E tests for the consultation lead API.

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{lead_body, spawn_app, ADMIN_TOKEN};

#[tokio::test]
async fn test_submit_lead_stores_encrypted_row() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/api/consultation")
        .json(&lead_body())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert!(body["data"]["message"].as_str().unwrap().contains("received"));

    let (name, phone, region): (String, String, String) =
        sqlx::query_as("SELECT name, phone, region FROM consultation LIMIT 1")
            .fetch_one(app.db.pool())
            .await
            .unwrap();
    assert!(!name.contains("Park"));
    assert!(name.contains(':'));
    assert!(!phone.contains("2222"));
    // Plain business fields stay readable.
    assert_eq!(region, "Busan");

    assert_eq!(app.notifier.lead_count(), 1);
}

#[tokio::test]
async fn test_submit_lead_requires_name() {
    let app = spawn_app().await;

    let mut body = lead_body();
    body["name"] = Value::String("  ".to_string());

    let response = app.server.post("/api/consultation").json(&body).await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(app.notifier.lead_count(), 0);
}

#[tokio::test]
async fn test_admin_lists_decrypted_leads() {
    let app = spawn_app().await;
    app.server.post("/api/consultation").json(&lead_body()).await;

    let unauthenticated = app.server.get("/api/admin/consultation").await;
    assert_eq!(unauthenticated.status_code(), StatusCode::UNAUTHORIZED);

    let page: Value = app
        .server
        .get("/api/admin/consultation")
        .authorization_bearer(ADMIN_TOKEN)
        .await
        .json();
    assert_eq!(page["meta"]["total"], 1);
    let lead = &page["data"][0];
    assert_eq!(lead["name"], "Park");
    assert_eq!(lead["phone"], "010-2222-3333");
    assert_eq!(lead["email"], "park@example.com");
    assert_eq!(lead["status"], "pending");
}

#[tokio::test]
async fn test_lead_status_workflow() {
    let app = spawn_app().await;
    app.server.post("/api/consultation").json(&lead_body()).await;

    let page: Value = app
        .server
        .get("/api/admin/consultation")
        .authorization_bearer(ADMIN_TOKEN)
        .await
        .json();
    let id = page["data"][0]["id"].as_i64().unwrap();

    let response = app
        .server
        .put(&format!("/api/admin/consultation/{id}/status"))
        .authorization_bearer(ADMIN_TOKEN)
        .json(&json!({"status": "in_progress"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let page: Value = app
        .server
        .get("/api/admin/consultation")
        .authorization_bearer(ADMIN_TOKEN)
        .await
        .json();
    assert_eq!(page["data"][0]["status"], "in_progress");

    // Unknown status value is a validation failure.
    let response = app
        .server
        .put(&format!("/api/admin/consultation/{id}/status"))
        .authorization_bearer(ADMIN_TOKEN)
        .json(&json!({"status": "archived"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    // Missing lead id is not found.
    let response = app
        .server
        .put("/api/admin/consultation/999/status")
        .authorization_bearer(ADMIN_TOKEN)
        .json(&json!({"status": "done"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
