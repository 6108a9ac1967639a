//! Request DTOs for the Web API.

use serde::Deserialize;
use validator::Validate;

use super::validation::not_empty_trimmed;

/// Query parameters for paginated listings.
#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    /// 1-based page number.
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_page() -> u32 {
    1
}

/// Public submission to a privacy-sensitive board.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitPostRequest {
    /// Author name.
    #[validate(custom(function = not_empty_trimmed), length(max = 50))]
    pub name: String,
    /// Author email.
    #[validate(custom(function = not_empty_trimmed), length(max = 254))]
    pub email: String,
    /// Author phone.
    #[validate(custom(function = not_empty_trimmed), length(max = 20))]
    pub phone: String,
    /// Access password for later viewing.
    #[validate(length(min = 4, max = 128))]
    pub password: String,
    /// Post title.
    #[validate(custom(function = not_empty_trimmed), length(max = 200))]
    pub title: String,
    /// Post body.
    #[validate(custom(function = not_empty_trimmed))]
    pub content: String,
}

/// Password challenge for viewing a gated post.
#[derive(Debug, Deserialize, Validate)]
pub struct VerifyPostRequest {
    /// Supplied access password.
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Administrative post creation (notice/event/faq).
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    /// Post title.
    #[validate(custom(function = not_empty_trimmed), length(max = 200))]
    pub title: String,
    /// Post body.
    #[validate(custom(function = not_empty_trimmed))]
    pub content: String,
    /// Pin the post above unpinned ones.
    #[serde(default)]
    pub pinned: bool,
}

/// Administrative post update.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePostRequest {
    /// New title.
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    /// New body.
    #[validate(length(min = 1))]
    pub content: Option<String>,
    /// New pinned state.
    pub pinned: Option<bool>,
}

/// Administrative reply to a post.
#[derive(Debug, Deserialize, Validate)]
pub struct ReplyRequest {
    /// Answer body.
    #[validate(custom(function = not_empty_trimmed))]
    pub content: String,
}

/// Consultation lead form.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitLeadRequest {
    /// Contact name.
    #[validate(custom(function = not_empty_trimmed), length(max = 50))]
    pub name: String,
    /// Contact phone.
    #[validate(custom(function = not_empty_trimmed), length(max = 20))]
    pub phone: String,
    /// Contact email.
    #[validate(length(max = 254))]
    pub email: Option<String>,
    /// Desired region.
    pub region: Option<String>,
    /// Available budget.
    pub budget: Option<String>,
    /// Prior business experience.
    pub experience: Option<String>,
    /// How the lead found the brand.
    pub path: Option<String>,
    /// Free-text message.
    pub message: Option<String>,
}

/// Lead status transition.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLeadStatusRequest {
    /// New status: pending, in_progress, or done.
    #[validate(custom(function = not_empty_trimmed))]
    pub status: String,
}
