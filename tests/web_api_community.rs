//! E2E tests for the public community board API.

mod common;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use serde_json::{json, Value};

use common::{inquiry_body, spawn_app, ADMIN_TOKEN};

#[tokio::test]
async fn test_health_check() {
    let app = spawn_app().await;
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn test_list_empty_board() {
    let app = spawn_app().await;

    let response = app.server.get("/api/community/notice/posts").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
    assert_eq!(body["meta"]["total"], 0);
}

#[tokio::test]
async fn test_unknown_category_is_not_found() {
    let app = spawn_app().await;
    let response = app.server.get("/api/community/blog/posts").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_submit_inquiry_end_to_end() {
    let app = spawn_app().await;

    // Submit with a proxy header so the creator IP gets stamped.
    let response = app
        .server
        .post("/api/community/inquiry/posts")
        .add_header(
            HeaderName::from_static("x-forwarded-for"),
            HeaderValue::from_static("203.0.113.7"),
        )
        .json(&inquiry_body())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    let post_no = body["data"]["post_no"].as_i64().unwrap();
    assert_eq!(body["data"]["status"], "pending");

    // The stored row holds a two-part encrypted phone token and an
    // adaptive hash, not the submitted plaintext.
    let (phone_token, password_hash, create_ip): (String, String, String) =
        sqlx::query_as("SELECT author_phone, password, create_ip FROM posts WHERE post_no = ?")
            .bind(post_no)
            .fetch_one(app.db.pool())
            .await
            .unwrap();
    let parts: Vec<&str> = phone_token.split(':').collect();
    assert_eq!(parts.len(), 2);
    assert!(parts.iter().all(|p| p.chars().all(|c| c.is_ascii_hexdigit())));
    assert!(!phone_token.contains("01011112222"));
    assert!(password_hash.starts_with("$argon2id$"));
    assert_ne!(password_hash, "secret1");
    assert_eq!(create_ip, "203.0.113.7");

    // Wrong password: generic mismatch.
    let response = app
        .server
        .post(&format!("/api/community/inquiry/posts/{post_no}/verify"))
        .json(&json!({"password": "wrong"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "password does not match");

    // Correct password: decrypted, formatted detail plus (absent) reply.
    let response = app
        .server
        .post(&format!("/api/community/inquiry/posts/{post_no}/verify"))
        .json(&json!({"password": "secret1"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["title"], "Q");
    assert_eq!(body["data"]["author_name"], "Kim");
    assert_eq!(body["data"]["author_phone"], "010-1111-2222");
    assert!(body["data"].get("reply").is_none());

    assert_eq!(app.notifier.post_count(), 1);
}

#[tokio::test]
async fn test_gate_enumeration_resistance() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/api/community/inquiry/posts")
        .json(&inquiry_body())
        .await;
    let post_no = response.json::<Value>()["data"]["post_no"].as_i64().unwrap();

    // Existing post, wrong password.
    let wrong = app
        .server
        .post(&format!("/api/community/inquiry/posts/{post_no}/verify"))
        .json(&json!({"password": "wrong"}))
        .await;
    // Nonexistent post, any password.
    let missing = app
        .server
        .post("/api/community/inquiry/posts/999999/verify")
        .json(&json!({"password": "secret1"}))
        .await;

    assert_eq!(wrong.status_code(), missing.status_code());
    assert_eq!(wrong.text(), missing.text());
}

#[tokio::test]
async fn test_gated_detail_always_demands_password() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/api/community/voice/posts")
        .json(&inquiry_body())
        .await;
    let post_no = response.json::<Value>()["data"]["post_no"].as_i64().unwrap();

    let existing = app
        .server
        .get(&format!("/api/community/voice/posts/{post_no}"))
        .await;
    let missing = app.server.get("/api/community/voice/posts/999999").await;

    // Same refusal whether or not the post exists.
    assert_eq!(existing.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(existing.status_code(), missing.status_code());
    assert_eq!(existing.text(), missing.text());
}

#[tokio::test]
async fn test_detail_view_counts_every_visit() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/api/admin/boards/notice/posts")
        .authorization_bearer(ADMIN_TOKEN)
        .json(&json!({"title": "News", "content": "body"}))
        .await;
    let post_no = response.json::<Value>()["data"]["post_no"].as_i64().unwrap();

    for expected in 1..=3 {
        let response = app
            .server
            .get(&format!("/api/community/notice/posts/{post_no}"))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["data"]["views"], expected);
    }

    // List views do not count.
    app.server.get("/api/community/notice/posts").await;
    let (views,): (i64,) = sqlx::query_as("SELECT views FROM posts WHERE post_no = ?")
        .bind(post_no)
        .fetch_one(app.db.pool())
        .await
        .unwrap();
    assert_eq!(views, 3);
}

#[tokio::test]
async fn test_pagination_and_pinning() {
    let app = spawn_app().await;

    // The pinned post is the oldest; it must lead page 1 anyway.
    let pinned = app
        .server
        .post("/api/admin/boards/notice/posts")
        .authorization_bearer(ADMIN_TOKEN)
        .json(&json!({"title": "Pinned", "content": "body", "pinned": true}))
        .await;
    let pinned_no = pinned.json::<Value>()["data"]["post_no"].as_i64().unwrap();
    for i in 1..=11 {
        app.server
            .post("/api/admin/boards/notice/posts")
            .authorization_bearer(ADMIN_TOKEN)
            .json(&json!({"title": format!("Post {i}"), "content": "body"}))
            .await;
    }

    let page1: Value = app.server.get("/api/community/notice/posts").await.json();
    let page2: Value = app
        .server
        .get("/api/community/notice/posts")
        .add_query_param("page", 2)
        .await
        .json();
    let page3: Value = app
        .server
        .get("/api/community/notice/posts")
        .add_query_param("page", 3)
        .await
        .json();

    let first = page1["data"].as_array().unwrap();
    let second = page2["data"].as_array().unwrap();
    let third = page3["data"].as_array().unwrap();

    assert_eq!(first.len(), 10);
    assert_eq!(second.len(), 2);
    assert_eq!(third.len(), 0);
    assert_eq!(page1["meta"]["total"], 12);
    assert_eq!(first[0]["post_no"].as_i64().unwrap(), pinned_no);
    assert_eq!(first[0]["pinned"], true);
}

#[tokio::test]
async fn test_submit_missing_field_is_validation_error() {
    let app = spawn_app().await;

    let mut body = inquiry_body();
    body["name"] = serde_json::Value::String("   ".to_string());

    let response = app
        .server
        .post("/api/community/inquiry/posts")
        .json(&body)
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    let error: Value = response.json();
    assert!(error["error"]["details"]["name"].is_array());
}

#[tokio::test]
async fn test_submit_to_non_sensitive_board_rejected() {
    let app = spawn_app().await;
    let response = app
        .server
        .post("/api/community/notice/posts")
        .json(&inquiry_body())
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}
