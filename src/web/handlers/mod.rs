//! API handlers for the Web API.

pub mod admin;
pub mod community;
pub mod consultation;

use std::sync::Arc;

use axum::http::HeaderMap;

use crate::board::BoardService;
use crate::config::Config;
use crate::consultation::ConsultationService;

/// Shared application state for handlers.
pub struct AppState {
    pub board: BoardService,
    pub consultation: ConsultationService,
    pub config: Arc<Config>,
}

impl AppState {
    /// Create the shared state.
    pub fn new(board: BoardService, consultation: ConsultationService, config: Arc<Config>) -> Self {
        Self {
            board,
            consultation,
            config,
        }
    }
}

/// Best-effort client IP from proxy headers.
///
/// Stamped onto created rows for audit; "unknown" when no proxy header is
/// present.
pub fn client_ip(headers: &HeaderMap) -> String {
    if let Some(forwarded) = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip").and_then(|value| value.to_str().ok()) {
        if !real_ip.trim().is_empty() {
            return real_ip.trim().to_string();
        }
    }

    "unknown".to_string()
}
