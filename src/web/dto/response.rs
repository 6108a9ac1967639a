//! Response DTOs for the Web API.

use serde::Serialize;

use crate::board::{Post, PostSummary, Reply, UnlockedPost};
use crate::consultation::DecryptedLead;

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    /// Response data.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub meta: PaginationMeta,
}

impl<T: Serialize> PaginatedResponse<T> {
    /// Create a new paginated response.
    pub fn new(data: Vec<T>, page: u32, per_page: u32, total: u64) -> Self {
        Self {
            data,
            meta: PaginationMeta {
                page,
                per_page,
                total,
            },
        }
    }
}

/// Pagination metadata.
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    /// Current page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of items.
    pub total: u64,
}

/// Simple acknowledgement message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable outcome.
    pub message: String,
}

/// Post summary in list views.
///
/// Never carries the body, contact fields, or password hash.
#[derive(Debug, Serialize)]
pub struct PostSummaryResponse {
    pub post_no: i64,
    pub title: String,
    pub writer: String,
    pub status: String,
    pub views: i64,
    pub pinned: bool,
    pub created_at: String,
}

impl From<PostSummary> for PostSummaryResponse {
    fn from(summary: PostSummary) -> Self {
        Self {
            post_no: summary.post_no,
            title: summary.title,
            writer: summary.writer,
            status: summary.status.as_str().to_string(),
            views: summary.views,
            pinned: summary.pinned,
            created_at: summary.create_dt,
        }
    }
}

/// Post detail.
#[derive(Debug, Serialize)]
pub struct PostDetailResponse {
    pub post_no: i64,
    pub title: String,
    pub content: String,
    pub writer: String,
    pub status: String,
    pub views: i64,
    pub pinned: bool,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl From<Post> for PostDetailResponse {
    fn from(post: Post) -> Self {
        Self {
            post_no: post.post_no,
            title: post.title,
            content: post.content,
            writer: post.writer,
            status: post.status.as_str().to_string(),
            views: post.views,
            pinned: post.pinned,
            created_at: post.create_dt,
            updated_at: post.update_dt,
        }
    }
}

/// Admin reply attached to a post detail.
#[derive(Debug, Serialize)]
pub struct ReplyResponse {
    pub reply_content: String,
    pub admin_id: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Reply> for ReplyResponse {
    fn from(reply: Reply) -> Self {
        Self {
            reply_content: reply.reply_content,
            admin_id: reply.admin_id,
            created_at: reply.created_at,
            updated_at: reply.updated_at,
        }
    }
}

/// Gated post detail after a successful password challenge (or for the
/// admin console).
#[derive(Debug, Serialize)]
pub struct UnlockedPostResponse {
    #[serde(flatten)]
    pub post: PostDetailResponse,
    pub author_name: String,
    pub author_email: String,
    pub author_phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<ReplyResponse>,
}

impl From<UnlockedPost> for UnlockedPostResponse {
    fn from(unlocked: UnlockedPost) -> Self {
        Self {
            post: unlocked.post.into(),
            author_name: unlocked.author_name,
            author_email: unlocked.author_email,
            author_phone: unlocked.author_phone,
            reply: unlocked.reply.map(ReplyResponse::from),
        }
    }
}

/// Outcome of an admin reply upsert.
#[derive(Debug, Serialize)]
pub struct ReplyOutcomeResponse {
    /// "created" on first creation, "updated" on edit.
    pub outcome: String,
}

/// Consultation lead for the admin console.
#[derive(Debug, Serialize)]
pub struct LeadResponse {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub status: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl From<DecryptedLead> for LeadResponse {
    fn from(lead: DecryptedLead) -> Self {
        Self {
            id: lead.id,
            name: lead.name,
            phone: lead.phone,
            email: lead.email,
            region: lead.region,
            budget: lead.budget,
            experience: lead.experience,
            path: lead.path,
            message: lead.message,
            status: lead.status.as_str().to_string(),
            created_at: lead.created_at,
            updated_at: lead.updated_at,
        }
    }
}
