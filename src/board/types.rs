//! Board and post models for plaza.

use std::fmt;
use std::str::FromStr;

/// Board category tag.
///
/// One logical board exists per (tenant, category) pair. `Voice` and
/// `Inquiry` are privacy-sensitive: posts there carry encrypted author
/// contact fields and a hashed access password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardCategory {
    /// Announcements from the brand.
    Notice,
    /// Promotions and events.
    Event,
    /// Frequently asked questions.
    Faq,
    /// Customer voice (privacy-sensitive).
    Voice,
    /// 1:1 inquiry board (privacy-sensitive).
    Inquiry,
}

impl BoardCategory {
    /// All categories, in display order.
    pub const ALL: [BoardCategory; 5] = [
        BoardCategory::Notice,
        BoardCategory::Event,
        BoardCategory::Faq,
        BoardCategory::Voice,
        BoardCategory::Inquiry,
    ];

    /// Convert category to its database tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardCategory::Notice => "notice",
            BoardCategory::Event => "event",
            BoardCategory::Faq => "faq",
            BoardCategory::Voice => "voice",
            BoardCategory::Inquiry => "inquiry",
        }
    }

    /// Human-facing board title.
    ///
    /// Total mapping: every category has a title, there is no generic
    /// fallback label.
    pub fn title(&self) -> &'static str {
        match self {
            BoardCategory::Notice => "Notices",
            BoardCategory::Event => "Events",
            BoardCategory::Faq => "FAQ",
            BoardCategory::Voice => "Customer Voice",
            BoardCategory::Inquiry => "Inquiries",
        }
    }

    /// Whether posts on this board carry encrypted author fields and a
    /// password gate.
    pub fn is_privacy_sensitive(&self) -> bool {
        matches!(self, BoardCategory::Voice | BoardCategory::Inquiry)
    }
}

impl fmt::Display for BoardCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BoardCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "notice" => Ok(BoardCategory::Notice),
            "event" => Ok(BoardCategory::Event),
            "faq" => Ok(BoardCategory::Faq),
            "voice" => Ok(BoardCategory::Voice),
            "inquiry" => Ok(BoardCategory::Inquiry),
            _ => Err(format!("unknown board category: {s}")),
        }
    }
}

/// Post workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostStatus {
    /// User-submitted, awaiting an answer.
    Pending,
    /// An admin reply exists.
    Answered,
    /// Regular published content (notice/event/faq).
    Published,
}

impl PostStatus {
    /// Convert status to its database string.
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Pending => "pending",
            PostStatus::Answered => "answered",
            PostStatus::Published => "published",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(PostStatus::Pending),
            "answered" => Ok(PostStatus::Answered),
            "published" => Ok(PostStatus::Published),
            _ => Err(format!("unknown post status: {s}")),
        }
    }
}

/// Board entity, scoped to a tenant and a category.
#[derive(Debug, Clone)]
pub struct Board {
    /// Unique board ID.
    pub id: i64,
    /// Owning tenant.
    pub company_id: i64,
    /// Category tag.
    pub category: BoardCategory,
    /// Provisioning timestamp.
    pub created_at: String,
}

/// Post entity.
///
/// The `author_*` fields hold encryption tokens and `password` holds a
/// PHC hash; all four are present exactly when the owning board is
/// privacy-sensitive.
#[derive(Debug, Clone)]
pub struct Post {
    /// Sequence number (identity).
    pub post_no: i64,
    /// Owning board.
    pub board_id: i64,
    /// Post title.
    pub title: String,
    /// Body (rich text).
    pub content: String,
    /// Display name of the writer.
    pub writer: String,
    /// Encrypted author name.
    pub author_name: Option<String>,
    /// Encrypted author email.
    pub author_email: Option<String>,
    /// Encrypted author phone.
    pub author_phone: Option<String>,
    /// Hashed access password.
    pub password: Option<String>,
    /// Workflow status.
    pub status: PostStatus,
    /// Creator IP.
    pub create_ip: String,
    /// Creation timestamp.
    pub create_dt: String,
    /// Last editor IP.
    pub update_ip: Option<String>,
    /// Last edit timestamp.
    pub update_dt: Option<String>,
    /// View counter; monotonically non-decreasing.
    pub views: i64,
    /// Whether the post sorts above unpinned posts.
    pub pinned: bool,
}

impl Post {
    /// Whether reading this post's detail requires password verification.
    pub fn is_gated(&self) -> bool {
        self.password.is_some()
    }
}

/// Post summary for list views.
///
/// Deliberately excludes body, contact fields, and the password hash:
/// list views never expose gated data.
#[derive(Debug, Clone)]
pub struct PostSummary {
    pub post_no: i64,
    pub title: String,
    pub writer: String,
    pub status: PostStatus,
    pub views: i64,
    pub pinned: bool,
    pub create_dt: String,
}

/// One page of post summaries plus the total row count for the board.
#[derive(Debug, Clone)]
pub struct PostPage {
    pub posts: Vec<PostSummary>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

/// Validated plaintext submission to a privacy-sensitive board.
///
/// Produced by the service from raw request input; contact fields are
/// still plaintext here and get encrypted/hashed before storage.
#[derive(Debug, Clone)]
pub struct InquirySubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub title: String,
    pub content: String,
}

/// Data for creating a user-submitted post, after encryption and hashing.
#[derive(Debug, Clone)]
pub struct NewInquiryPost {
    pub board_id: i64,
    pub title: String,
    pub content: String,
    pub writer: String,
    pub author_name: String,
    pub author_email: String,
    pub author_phone: String,
    pub password: String,
    pub create_ip: String,
}

/// Data for creating an administrative post (notice/event/faq).
#[derive(Debug, Clone)]
pub struct NewAdminPost {
    pub board_id: i64,
    pub title: String,
    pub content: String,
    pub writer: String,
    pub pinned: bool,
    pub create_ip: String,
}

/// Data for updating an existing post.
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    /// New title.
    pub title: Option<String>,
    /// New body.
    pub content: Option<String>,
    /// New pinned state.
    pub pinned: Option<bool>,
}

impl PostUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set new title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set new body.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set pinned state.
    pub fn pinned(mut self, pinned: bool) -> Self {
        self.pinned = Some(pinned);
        self
    }

    /// Check if any fields are set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.pinned.is_none()
    }
}
