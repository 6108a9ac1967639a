//! Admin console handlers.
//!
//! Every handler takes [`AdminAuth`], the static-token guard.

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use std::sync::Arc;

use crate::board::{BoardCategory, PostUpdate, ReplyOutcome};
use crate::consultation::LeadStatus;
use crate::web::dto::{
    ApiResponse, CreatePostRequest, LeadResponse, MessageResponse, PaginatedResponse,
    PaginationQuery, PostDetailResponse, ReplyOutcomeResponse, ReplyRequest,
    UpdateLeadStatusRequest, UpdatePostRequest, UnlockedPostResponse, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::{client_ip, AppState};
use crate::web::middleware::AdminAuth;

fn parse_category(raw: &str) -> Result<BoardCategory, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::not_found("board not found"))
}

/// POST /api/admin/boards/:category/posts - Create an administrative post.
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    admin: AdminAuth,
    Path(category): Path<String>,
    headers: HeaderMap,
    ValidatedJson(req): ValidatedJson<CreatePostRequest>,
) -> Result<Json<ApiResponse<PostDetailResponse>>, ApiError> {
    let category = parse_category(&category)?;
    let ip = client_ip(&headers);

    let post = state
        .board
        .create_admin_post(
            category,
            &req.title,
            &req.content,
            req.pinned,
            &admin.display_name,
            &ip,
        )
        .await?;

    Ok(Json(ApiResponse::new(post.into())))
}

/// GET /api/admin/posts/:post_no - Full post detail, gate bypassed.
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    _admin: AdminAuth,
    Path(post_no): Path<i64>,
) -> Result<Json<ApiResponse<UnlockedPostResponse>>, ApiError> {
    let detail = state.board.admin_view_post(post_no).await?;
    Ok(Json(ApiResponse::new(detail.into())))
}

/// PUT /api/admin/posts/:post_no - Edit title, body, or pinned flag.
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    _admin: AdminAuth,
    Path(post_no): Path<i64>,
    headers: HeaderMap,
    ValidatedJson(req): ValidatedJson<UpdatePostRequest>,
) -> Result<Json<ApiResponse<PostDetailResponse>>, ApiError> {
    let ip = client_ip(&headers);

    let mut update = PostUpdate::new();
    if let Some(title) = req.title {
        update = update.title(title);
    }
    if let Some(content) = req.content {
        update = update.content(content);
    }
    if let Some(pinned) = req.pinned {
        update = update.pinned(pinned);
    }

    let post = state.board.update_post(post_no, update, &ip).await?;
    Ok(Json(ApiResponse::new(post.into())))
}

/// DELETE /api/admin/posts/:post_no - Hard-delete a post.
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    _admin: AdminAuth,
    Path(post_no): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.board.delete_post(post_no).await?;
    Ok(Json(MessageResponse {
        message: "post deleted".to_string(),
    }))
}

/// POST /api/admin/posts/:post_no/reply - Upsert the admin answer.
pub async fn reply_to_post(
    State(state): State<Arc<AppState>>,
    admin: AdminAuth,
    Path(post_no): Path<i64>,
    ValidatedJson(req): ValidatedJson<ReplyRequest>,
) -> Result<Json<ApiResponse<ReplyOutcomeResponse>>, ApiError> {
    let outcome = state
        .board
        .reply_to_post(post_no, &req.content, admin.admin_id)
        .await?;

    let outcome = match outcome {
        ReplyOutcome::Created => "created",
        ReplyOutcome::Updated => "updated",
    };
    Ok(Json(ApiResponse::new(ReplyOutcomeResponse {
        outcome: outcome.to_string(),
    })))
}

/// GET /api/admin/consultation - List leads with decrypted contact fields.
pub async fn list_leads(
    State(state): State<Arc<AppState>>,
    _admin: AdminAuth,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<PaginatedResponse<LeadResponse>>, ApiError> {
    let page = state.consultation.list_leads(pagination.page, 10).await?;

    let leads: Vec<LeadResponse> = page.leads.into_iter().map(LeadResponse::from).collect();

    Ok(Json(PaginatedResponse::new(
        leads,
        page.page,
        page.per_page,
        page.total as u64,
    )))
}

/// PUT /api/admin/consultation/:id/status - Move a lead through its
/// workflow.
pub async fn update_lead_status(
    State(state): State<Arc<AppState>>,
    _admin: AdminAuth,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdateLeadStatusRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let status: LeadStatus = req
        .status
        .parse()
        .map_err(|e: String| ApiError::unprocessable(e))?;

    state.consultation.update_status(id, status).await?;
    Ok(Json(MessageResponse {
        message: "status updated".to_string(),
    }))
}
