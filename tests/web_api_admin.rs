//! E2E tests for the admin console API.

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{inquiry_body, spawn_app, ADMIN_TOKEN};

#[tokio::test]
async fn test_admin_routes_require_token() {
    let app = spawn_app().await;

    let no_token = app.server.get("/api/admin/posts/1").await;
    assert_eq!(no_token.status_code(), StatusCode::UNAUTHORIZED);

    let bad_token = app
        .server
        .get("/api/admin/posts/1")
        .authorization_bearer("wrong-token")
        .await;
    assert_eq!(bad_token.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_reply_flow_with_single_notification() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/api/community/inquiry/posts")
        .json(&inquiry_body())
        .await;
    let post_no = response.json::<Value>()["data"]["post_no"].as_i64().unwrap();

    // First reply: created, status answered, one author notification.
    let response = app
        .server
        .post(&format!("/api/admin/posts/{post_no}/reply"))
        .authorization_bearer(ADMIN_TOKEN)
        .json(&json!({"content": "first answer"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["data"]["outcome"], "created");
    assert_eq!(app.notifier.reply_count(), 1);

    let detail: Value = app
        .server
        .get(&format!("/api/admin/posts/{post_no}"))
        .authorization_bearer(ADMIN_TOKEN)
        .await
        .json();
    assert_eq!(detail["data"]["status"], "answered");
    assert_eq!(detail["data"]["reply"]["reply_content"], "first answer");
    assert_eq!(detail["data"]["reply"]["admin_id"], 7);

    // Second reply: updated in place, no re-notification.
    let response = app
        .server
        .post(&format!("/api/admin/posts/{post_no}/reply"))
        .authorization_bearer(ADMIN_TOKEN)
        .json(&json!({"content": "edited answer"}))
        .await;
    assert_eq!(response.json::<Value>()["data"]["outcome"], "updated");
    assert_eq!(app.notifier.reply_count(), 1);

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM replies WHERE post_no = ?")
        .bind(post_no)
        .fetch_one(app.db.pool())
        .await
        .unwrap();
    assert_eq!(count, 1);

    // The unlocked public view now carries the edited answer.
    let unlocked: Value = app
        .server
        .post(&format!("/api/community/inquiry/posts/{post_no}/verify"))
        .json(&json!({"password": "secret1"}))
        .await
        .json();
    assert_eq!(unlocked["data"]["reply"]["reply_content"], "edited answer");
    assert_eq!(unlocked["data"]["status"], "answered");
}

#[tokio::test]
async fn test_reply_to_missing_post() {
    let app = spawn_app().await;
    let response = app
        .server
        .post("/api/admin/posts/999/reply")
        .authorization_bearer(ADMIN_TOKEN)
        .json(&json!({"content": "answer"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_post_crud() {
    let app = spawn_app().await;

    let created: Value = app
        .server
        .post("/api/admin/boards/event/posts")
        .authorization_bearer(ADMIN_TOKEN)
        .json(&json!({"title": "Sale", "content": "body", "pinned": true}))
        .await
        .json();
    let post_no = created["data"]["post_no"].as_i64().unwrap();
    assert_eq!(created["data"]["status"], "published");
    assert_eq!(created["data"]["writer"], "Admin");
    assert_eq!(created["data"]["pinned"], true);

    let updated: Value = app
        .server
        .put(&format!("/api/admin/posts/{post_no}"))
        .authorization_bearer(ADMIN_TOKEN)
        .json(&json!({"title": "Bigger Sale", "pinned": false}))
        .await
        .json();
    assert_eq!(updated["data"]["title"], "Bigger Sale");
    assert_eq!(updated["data"]["pinned"], false);
    assert_eq!(updated["data"]["content"], "body");

    let deleted = app
        .server
        .delete(&format!("/api/admin/posts/{post_no}"))
        .authorization_bearer(ADMIN_TOKEN)
        .await;
    assert_eq!(deleted.status_code(), StatusCode::OK);

    let gone = app
        .server
        .get(&format!("/api/admin/posts/{post_no}"))
        .authorization_bearer(ADMIN_TOKEN)
        .await;
    assert_eq!(gone.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_view_decrypts_contact_fields() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/api/community/voice/posts")
        .json(&inquiry_body())
        .await;
    let post_no = response.json::<Value>()["data"]["post_no"].as_i64().unwrap();

    let detail: Value = app
        .server
        .get(&format!("/api/admin/posts/{post_no}"))
        .authorization_bearer(ADMIN_TOKEN)
        .await
        .json();
    assert_eq!(detail["data"]["author_name"], "Kim");
    assert_eq!(detail["data"]["author_email"], "kim@example.com");
    assert_eq!(detail["data"]["author_phone"], "010-1111-2222");
}

#[tokio::test]
async fn test_admin_create_on_sensitive_board_rejected() {
    let app = spawn_app().await;
    let response = app
        .server
        .post("/api/admin/boards/inquiry/posts")
        .authorization_bearer(ADMIN_TOKEN)
        .json(&json!({"title": "t", "content": "c"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}
