//! Test helpers for Web API E2E tests.
//!
//! Builds the real router over an in-memory database and a recording
//! notifier, served through axum-test.

use std::sync::Arc;

use axum_test::TestServer;
use serde_json::json;

use plaza::board::BoardService;
use plaza::config::Config;
use plaza::consultation::ConsultationService;
use plaza::notify::RecordingNotifier;
use plaza::web::{create_router, AppState};
use plaza::{Database, FieldCodec};

/// Fixed test encryption key (32 bytes, hex).
pub const TEST_KEY: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

/// Bearer token accepted by the admin routes in tests.
pub const ADMIN_TOKEN: &str = "test-admin-token";

/// A running test application.
pub struct TestApp {
    pub server: TestServer,
    pub db: Database,
    pub notifier: Arc<RecordingNotifier>,
}

/// Spin up the app against a fresh in-memory database.
///
/// The migrations seed the five boards for company 1, which is also the
/// configured tenant.
pub async fn spawn_app() -> TestApp {
    let mut config = Config::default();
    config.security.encryption_key = TEST_KEY.to_string();
    config.admin.token = ADMIN_TOKEN.to_string();
    config.admin.id = 7;
    config.admin.display_name = "Admin".to_string();
    let config = Arc::new(config);

    let db = Database::open_in_memory().await.expect("open db");
    let codec = Arc::new(FieldCodec::from_hex(TEST_KEY).expect("codec"));
    let notifier = Arc::new(RecordingNotifier::new());

    let board = BoardService::new(
        db.pool().clone(),
        codec.clone(),
        notifier.clone(),
        config.site.company_id,
    );
    let consultation = ConsultationService::new(db.pool().clone(), codec, notifier.clone());

    let state = Arc::new(AppState::new(board, consultation, config));
    let server = TestServer::new(create_router(state)).expect("test server");

    TestApp {
        server,
        db,
        notifier,
    }
}

/// A valid inquiry submission body.
pub fn inquiry_body() -> serde_json::Value {
    json!({
        "name": "Kim",
        "email": "kim@example.com",
        "phone": "01011112222",
        "password": "secret1",
        "title": "Q",
        "content": "help"
    })
}

/// A valid consultation lead body.
pub fn lead_body() -> serde_json::Value {
    json!({
        "name": "Park",
        "phone": "010-2222-3333",
        "email": "park@example.com",
        "region": "Busan",
        "budget": "80m",
        "message": "call me"
    })
}
