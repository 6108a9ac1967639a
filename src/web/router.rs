//! Router configuration for the Web API.

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{admin, community, consultation, AppState};
use super::middleware::create_cors_layer;

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let community_routes = Router::new()
        .route(
            "/:category/posts",
            get(community::list_posts).post(community::submit_post),
        )
        .route("/:category/posts/:post_no", get(community::get_post))
        .route(
            "/:category/posts/:post_no/verify",
            post(community::verify_post),
        );

    let admin_routes = Router::new()
        .route("/boards/:category/posts", post(admin::create_post))
        .route(
            "/posts/:post_no",
            get(admin::get_post)
                .put(admin::update_post)
                .delete(admin::delete_post),
        )
        .route("/posts/:post_no/reply", post(admin::reply_to_post))
        .route("/consultation", get(admin::list_leads))
        .route("/consultation/:id/status", put(admin::update_lead_status));

    let api_routes = Router::new()
        .nest("/community", community_routes)
        .route("/consultation", post(consultation::submit_lead))
        .nest("/admin", admin_routes);

    let cors = create_cors_layer(&app_state.config.web.cors_origins);

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(app_state)
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
