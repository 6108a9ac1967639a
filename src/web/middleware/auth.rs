//! Admin authentication for the Web API.
//!
//! Session management for the admin console is out of scope; admin routes
//! are guarded by a static bearer token from configuration instead. The
//! extractor yields the acting admin's identity for audit stamping.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use std::sync::Arc;

use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Authenticated admin context.
#[derive(Debug, Clone)]
pub struct AdminAuth {
    /// Id recorded as the acting admin.
    pub admin_id: i64,
    /// Display name stamped as writer on admin-created posts.
    pub display_name: String,
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AdminAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let expected = &state.config.admin.token;
        if expected.is_empty() {
            // No token configured means the admin surface is disabled.
            return Err(ApiError::unauthorized("admin access is not configured"));
        }

        let supplied = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .unwrap_or("");

        if supplied.is_empty() || supplied != expected {
            return Err(ApiError::unauthorized("invalid admin token"));
        }

        Ok(AdminAuth {
            admin_id: state.config.admin.id,
            display_name: state.config.admin.display_name.clone(),
        })
    }
}
