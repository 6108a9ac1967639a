//! Public community board handlers.

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use std::sync::Arc;

use crate::board::{BoardCategory, InquirySubmission, DEFAULT_PAGE_SIZE};
use crate::web::dto::{
    ApiResponse, PaginatedResponse, PaginationQuery, PostDetailResponse, PostSummaryResponse,
    SubmitPostRequest, UnlockedPostResponse, ValidatedJson, VerifyPostRequest,
};
use crate::web::error::ApiError;
use crate::web::handlers::{client_ip, AppState};

/// Resolve a category path segment.
///
/// An unknown tag reads as a board that doesn't exist.
fn parse_category(raw: &str) -> Result<BoardCategory, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::not_found("board not found"))
}

/// GET /api/community/:category/posts - List one page of a board.
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<PaginatedResponse<PostSummaryResponse>>, ApiError> {
    let category = parse_category(&category)?;

    let page = state
        .board
        .list_page(category, pagination.page, DEFAULT_PAGE_SIZE)
        .await?;

    let posts: Vec<PostSummaryResponse> = page
        .posts
        .into_iter()
        .map(PostSummaryResponse::from)
        .collect();

    Ok(Json(PaginatedResponse::new(
        posts,
        page.page,
        page.per_page,
        page.total as u64,
    )))
}

/// POST /api/community/:category/posts - Submit a post to a
/// privacy-sensitive board.
pub async fn submit_post(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
    headers: HeaderMap,
    ValidatedJson(req): ValidatedJson<SubmitPostRequest>,
) -> Result<Json<ApiResponse<PostDetailResponse>>, ApiError> {
    let category = parse_category(&category)?;
    let ip = client_ip(&headers);

    let submission = InquirySubmission {
        name: req.name,
        email: req.email,
        phone: req.phone,
        password: req.password,
        title: req.title,
        content: req.content,
    };

    let post = state.board.submit_post(category, submission, &ip).await?;

    Ok(Json(ApiResponse::new(post.into())))
}

/// GET /api/community/:category/posts/:post_no - Post detail for
/// non-gated boards.
///
/// Counts the view. Gated boards always answer with the password
/// challenge regardless of whether the post exists.
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path((category, post_no)): Path<(String, i64)>,
) -> Result<Json<ApiResponse<PostDetailResponse>>, ApiError> {
    let category = parse_category(&category)?;

    if category.is_privacy_sensitive() {
        return Err(ApiError::forbidden(
            "password verification is required to view this post",
        ));
    }

    let post = state.board.view_post(category, post_no).await?;
    Ok(Json(ApiResponse::new(post.into())))
}

/// POST /api/community/:category/posts/:post_no/verify - Password
/// challenge for a gated post.
pub async fn verify_post(
    State(state): State<Arc<AppState>>,
    Path((category, post_no)): Path<(String, i64)>,
    ValidatedJson(req): ValidatedJson<VerifyPostRequest>,
) -> Result<Json<ApiResponse<UnlockedPostResponse>>, ApiError> {
    let category = parse_category(&category)?;

    let unlocked = state
        .board
        .unlock_post(category, post_no, &req.password)
        .await?;

    Ok(Json(ApiResponse::new(unlocked.into())))
}
