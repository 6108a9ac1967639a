//! Public consultation lead handler.

use axum::{extract::State, http::HeaderMap, Json};
use std::sync::Arc;

use crate::consultation::LeadSubmission;
use crate::web::dto::{ApiResponse, MessageResponse, SubmitLeadRequest, ValidatedJson};
use crate::web::error::ApiError;
use crate::web::handlers::{client_ip, AppState};

/// POST /api/consultation - Submit a franchise-inquiry lead.
pub async fn submit_lead(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ValidatedJson(req): ValidatedJson<SubmitLeadRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let ip = client_ip(&headers);

    let submission = LeadSubmission {
        name: req.name,
        phone: req.phone,
        email: req.email,
        region: req.region,
        budget: req.budget,
        experience: req.experience,
        path: req.path,
        message: req.message,
    };

    state.consultation.submit_lead(submission, &ip).await?;

    Ok(Json(ApiResponse::new(MessageResponse {
        message: "consultation request received; we will contact you shortly".to_string(),
    })))
}
