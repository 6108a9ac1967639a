//! Board service for plaza.
//!
//! Orchestrates the request flows over the board subsystem: validation,
//! the privacy primitives, the post/reply stores, the access gate, and
//! best-effort notifications.

use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::{error, warn};

use super::access::AccessGate;
use super::directory::BoardDirectory;
use super::post_repository::PostRepository;
use super::reply::{Reply, ReplyOutcome};
use super::reply_repository::ReplyRepository;
use super::types::{
    BoardCategory, InquirySubmission, NewAdminPost, NewInquiryPost, Post, PostPage, PostStatus,
    PostUpdate,
};
use crate::notify::{Notifier, PostNotification, ReplyNotification};
use crate::privacy::{self, format_phone, strip_phone, FieldCodec, PasswordError};
use crate::{PlazaError, Result};

/// Fixed page size for board listings.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// A gated post after the access gate has been passed (or for an admin),
/// with author fields decrypted and the current reply attached.
#[derive(Debug, Clone)]
pub struct UnlockedPost {
    pub post: Post,
    /// Decrypted author name; empty on non-privacy boards.
    pub author_name: String,
    /// Decrypted author email; empty on non-privacy boards.
    pub author_email: String,
    /// Decrypted author phone, hyphenated for display.
    pub author_phone: String,
    pub reply: Option<Reply>,
}

/// Service over the board subsystem, scoped to one tenant.
#[derive(Clone)]
pub struct BoardService {
    pool: SqlitePool,
    codec: Arc<FieldCodec>,
    notifier: Arc<dyn Notifier>,
    company_id: i64,
}

impl BoardService {
    /// Create a new board service.
    pub fn new(
        pool: SqlitePool,
        codec: Arc<FieldCodec>,
        notifier: Arc<dyn Notifier>,
        company_id: i64,
    ) -> Self {
        Self {
            pool,
            codec,
            notifier,
            company_id,
        }
    }

    /// List one page of a board.
    ///
    /// An unprovisioned board degrades to an empty listing; page numbers
    /// are 1-based and pages past the end come back empty with the true
    /// total.
    pub async fn list_page(
        &self,
        category: BoardCategory,
        page: u32,
        per_page: u32,
    ) -> Result<PostPage> {
        let page = page.max(1);
        let per_page = if per_page == 0 { DEFAULT_PAGE_SIZE } else { per_page };

        let directory = BoardDirectory::new(&self.pool);
        let Some(board_id) = directory.resolve(self.company_id, category).await? else {
            return Ok(PostPage {
                posts: Vec::new(),
                page,
                per_page,
                total: 0,
            });
        };

        let repo = PostRepository::new(&self.pool);
        let offset = i64::from(page - 1) * i64::from(per_page);
        let posts = repo.list_page(board_id, offset, i64::from(per_page)).await?;
        let total = repo.count_by_board(board_id).await?;

        Ok(PostPage {
            posts,
            page,
            per_page,
            total,
        })
    }

    /// Submit a post to a privacy-sensitive board.
    ///
    /// Validates required fields, hashes the access password off the async
    /// path, encrypts the contact fields, persists, and fires the new-post
    /// notification without coupling the outcome to it.
    pub async fn submit_post(
        &self,
        category: BoardCategory,
        submission: InquirySubmission,
        create_ip: &str,
    ) -> Result<Post> {
        if !category.is_privacy_sensitive() {
            return Err(PlazaError::Validation(format!(
                "the {category} board does not accept public submissions"
            )));
        }

        require_field(&submission.name, "name")?;
        require_field(&submission.email, "email")?;
        require_field(&submission.phone, "phone")?;
        require_field(&submission.password, "password")?;
        require_field(&submission.title, "title")?;
        require_field(&submission.content, "content")?;

        let phone_digits = strip_phone(&submission.phone);
        if !(9..=11).contains(&phone_digits.len()) {
            return Err(PlazaError::Validation(
                "phone number must be 9 to 11 digits".to_string(),
            ));
        }
        privacy::validate_password(&submission.password).map_err(validation_from_password)?;

        let directory = BoardDirectory::new(&self.pool);
        let board_id = directory
            .resolve(self.company_id, category)
            .await?
            .ok_or_else(|| PlazaError::NotFound("board".to_string()))?;

        let password_hash = hash_blocking(submission.password.clone()).await?;

        let new_post = NewInquiryPost {
            board_id,
            title: submission.title.trim().to_string(),
            content: submission.content.clone(),
            writer: submission.name.trim().to_string(),
            author_name: self.codec.encrypt(submission.name.trim()),
            author_email: self.codec.encrypt(submission.email.trim()),
            author_phone: self.codec.encrypt(&phone_digits),
            password: password_hash,
            create_ip: create_ip.to_string(),
        };

        let repo = PostRepository::new(&self.pool);
        let post = repo.create_inquiry(&new_post).await?;

        let notification = PostNotification {
            category: category.as_str().to_string(),
            board_title: category.title().to_string(),
            post_no: post.post_no,
            title: post.title.clone(),
            writer: post.writer.clone(),
        };
        if let Err(e) = self.notifier.notify_new_post(&notification).await {
            warn!(post_no = post.post_no, "new-post notification failed: {}", e);
        }

        Ok(post)
    }

    /// View a post on a non-privacy-sensitive board.
    ///
    /// Counts the view (exactly once per call, deliberately not
    /// idempotent) and returns the post.
    pub async fn view_post(&self, category: BoardCategory, post_no: i64) -> Result<Post> {
        if category.is_privacy_sensitive() {
            return Err(PlazaError::Validation(
                "password verification is required to view this post".to_string(),
            ));
        }

        let repo = PostRepository::new(&self.pool);
        if !repo.increment_views(post_no).await? {
            return Err(PlazaError::NotFound("post".to_string()));
        }

        repo.get_by_id(post_no)
            .await?
            .ok_or_else(|| PlazaError::NotFound("post".to_string()))
    }

    /// Pass the access gate for a gated post and return its decrypted
    /// detail together with any reply.
    ///
    /// A missing post, a post from another board, and a wrong password are
    /// all reported as the same [`PlazaError::AccessDenied`], so the
    /// endpoint cannot be used to enumerate post ids.
    pub async fn unlock_post(
        &self,
        category: BoardCategory,
        post_no: i64,
        password: &str,
    ) -> Result<UnlockedPost> {
        if !category.is_privacy_sensitive() {
            return Err(PlazaError::Validation(format!(
                "the {category} board is not password-gated"
            )));
        }

        let directory = BoardDirectory::new(&self.pool);
        let board_id = directory.resolve(self.company_id, category).await?;

        let repo = PostRepository::new(&self.pool);
        let mut post = repo.get_by_id(post_no).await?;
        // A post reached through the wrong category path counts as absent.
        if let Some(ref p) = post {
            if board_id != Some(p.board_id) {
                post = None;
            }
        }

        let mut gate = AccessGate::for_post(post.as_ref());
        let supplied = password.to_string();
        let gate = tokio::task::spawn_blocking(move || {
            gate.unlock(&supplied);
            gate
        })
        .await
        .map_err(|e| PlazaError::Database(format!("verification task failed: {e}")))?;

        if !gate.is_unlocked() {
            return Err(PlazaError::AccessDenied);
        }

        // The gate only unlocks for an existing post.
        let post = post.ok_or(PlazaError::AccessDenied)?;
        let reply = ReplyRepository::new(&self.pool).get_by_post(post_no).await?;

        Ok(self.decrypt_detail(post, reply))
    }

    /// Full post detail for the admin console, gate bypassed.
    pub async fn admin_view_post(&self, post_no: i64) -> Result<UnlockedPost> {
        let repo = PostRepository::new(&self.pool);
        let post = repo
            .get_by_id(post_no)
            .await?
            .ok_or_else(|| PlazaError::NotFound("post".to_string()))?;
        let reply = ReplyRepository::new(&self.pool).get_by_post(post_no).await?;

        Ok(self.decrypt_detail(post, reply))
    }

    /// Create an administrative post on a non-privacy board.
    pub async fn create_admin_post(
        &self,
        category: BoardCategory,
        title: &str,
        content: &str,
        pinned: bool,
        writer: &str,
        create_ip: &str,
    ) -> Result<Post> {
        if category.is_privacy_sensitive() {
            return Err(PlazaError::Validation(format!(
                "the {category} board only takes user submissions"
            )));
        }
        require_field(title, "title")?;
        require_field(content, "content")?;

        let directory = BoardDirectory::new(&self.pool);
        let board_id = directory
            .resolve(self.company_id, category)
            .await?
            .ok_or_else(|| PlazaError::NotFound("board".to_string()))?;

        let repo = PostRepository::new(&self.pool);
        repo.create_admin(&NewAdminPost {
            board_id,
            title: title.trim().to_string(),
            content: content.to_string(),
            writer: writer.to_string(),
            pinned,
            create_ip: create_ip.to_string(),
        })
        .await
    }

    /// Update a post's title, body, or pinned flag.
    pub async fn update_post(
        &self,
        post_no: i64,
        update: PostUpdate,
        update_ip: &str,
    ) -> Result<Post> {
        if let Some(ref title) = update.title {
            require_field(title, "title")?;
        }
        if let Some(ref content) = update.content {
            require_field(content, "content")?;
        }

        let repo = PostRepository::new(&self.pool);
        repo.update(post_no, &update, update_ip)
            .await?
            .ok_or_else(|| PlazaError::NotFound("post".to_string()))
    }

    /// Hard-delete a post.
    pub async fn delete_post(&self, post_no: i64) -> Result<()> {
        let repo = PostRepository::new(&self.pool);
        if !repo.delete(post_no).await? {
            return Err(PlazaError::NotFound("post".to_string()));
        }
        Ok(())
    }

    /// Upsert the admin reply for a post and move it to `answered`.
    ///
    /// Both writes commit in one transaction. Only a first creation fires
    /// the answer notification toward the post's author; edits stay
    /// silent.
    pub async fn reply_to_post(
        &self,
        post_no: i64,
        body: &str,
        admin_id: i64,
    ) -> Result<ReplyOutcome> {
        require_field(body, "reply content")?;

        let repo = PostRepository::new(&self.pool);
        let post = repo
            .get_by_id(post_no)
            .await?
            .ok_or_else(|| PlazaError::NotFound("post".to_string()))?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| PlazaError::Database(e.to_string()))?;
        let outcome = ReplyRepository::upsert_tx(&mut tx, post_no, body, admin_id).await?;
        PostRepository::set_status_tx(&mut tx, post_no, PostStatus::Answered).await?;
        tx.commit()
            .await
            .map_err(|e| PlazaError::Database(e.to_string()))?;

        if outcome.is_first() {
            self.notify_first_reply(&post, body).await;
        }

        Ok(outcome)
    }

    /// Get the current reply for a post.
    pub async fn get_reply(&self, post_no: i64) -> Result<Option<Reply>> {
        ReplyRepository::new(&self.pool).get_by_post(post_no).await
    }

    async fn notify_first_reply(&self, post: &Post, body: &str) {
        // Author contact only exists on privacy-sensitive boards; nothing
        // to address otherwise.
        let Some(email_token) = post.author_email.as_deref() else {
            return;
        };

        let directory = BoardDirectory::new(&self.pool);
        let category = match directory.category_of_post(post.post_no).await {
            Ok(Some(category)) => category,
            Ok(None) => return,
            Err(e) => {
                error!(post_no = post.post_no, "reply notification lookup failed: {}", e);
                return;
            }
        };

        let notification = ReplyNotification {
            category: category.as_str().to_string(),
            post_no: post.post_no,
            post_title: post.title.clone(),
            author_name: self
                .codec
                .decrypt_or_unavailable(post.author_name.as_deref().unwrap_or("")),
            author_email: self.codec.decrypt_or_unavailable(email_token),
            reply_content: body.to_string(),
        };
        if let Err(e) = self.notifier.notify_new_reply(&notification).await {
            warn!(post_no = post.post_no, "reply notification failed: {}", e);
        }
    }

    fn decrypt_detail(&self, post: Post, reply: Option<Reply>) -> UnlockedPost {
        let author_name = post
            .author_name
            .as_deref()
            .map(|t| self.codec.decrypt_or_unavailable(t))
            .unwrap_or_default();
        let author_email = post
            .author_email
            .as_deref()
            .map(|t| self.codec.decrypt_or_unavailable(t))
            .unwrap_or_default();
        let author_phone = post
            .author_phone
            .as_deref()
            .map(|t| format_phone(&self.codec.decrypt_or_unavailable(t)))
            .unwrap_or_default();

        UnlockedPost {
            post,
            author_name,
            author_email,
            author_phone,
            reply,
        }
    }
}

fn require_field(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PlazaError::Validation(format!("{name} is required")));
    }
    Ok(())
}

fn validation_from_password(e: PasswordError) -> PlazaError {
    match e {
        PasswordError::TooShort | PasswordError::TooLong => PlazaError::Validation(e.to_string()),
        other => PlazaError::Database(format!("password hashing failed: {other}")),
    }
}

async fn hash_blocking(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || privacy::hash_password(&password))
        .await
        .map_err(|e| PlazaError::Database(format!("hashing task failed: {e}")))?
        .map_err(validation_from_password)
}
