//! Post repository for plaza.
//!
//! CRUD operations for posts. Encryption and hashing happen above this
//! layer; the repository stores whatever tokens it is handed.

use sqlx::sqlite::SqlitePool;
use sqlx::{QueryBuilder, Sqlite, Transaction};

use super::types::{NewAdminPost, NewInquiryPost, Post, PostStatus, PostSummary, PostUpdate};
use crate::{PlazaError, Result};

/// Repository for post CRUD operations.
pub struct PostRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PostRepository<'a> {
    /// Create a new PostRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a user-submitted post on a privacy-sensitive board.
    ///
    /// Contact fields are encryption tokens and `password` is a PHC hash
    /// by the time they reach this method. Status starts at `pending`,
    /// views at 0, unpinned.
    pub async fn create_inquiry(&self, new_post: &NewInquiryPost) -> Result<Post> {
        let result = sqlx::query(
            "INSERT INTO posts
             (board_id, title, content, writer, author_name, author_email, author_phone,
              password, status, create_ip, views, top_yn)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, 'pending', ?, 0, 'N')",
        )
        .bind(new_post.board_id)
        .bind(&new_post.title)
        .bind(&new_post.content)
        .bind(&new_post.writer)
        .bind(&new_post.author_name)
        .bind(&new_post.author_email)
        .bind(&new_post.author_phone)
        .bind(&new_post.password)
        .bind(&new_post.create_ip)
        .execute(self.pool)
        .await
        .map_err(|e| PlazaError::Database(e.to_string()))?;

        let post_no = result.last_insert_rowid();
        self.get_by_id(post_no)
            .await?
            .ok_or_else(|| PlazaError::NotFound("post".to_string()))
    }

    /// Create an administrative post (notice/event/faq).
    ///
    /// No contact fields, no password; status starts at `published`.
    pub async fn create_admin(&self, new_post: &NewAdminPost) -> Result<Post> {
        let result = sqlx::query(
            "INSERT INTO posts
             (board_id, title, content, writer, status, create_ip, views, top_yn)
             VALUES (?, ?, ?, ?, 'published', ?, 0, ?)",
        )
        .bind(new_post.board_id)
        .bind(&new_post.title)
        .bind(&new_post.content)
        .bind(&new_post.writer)
        .bind(&new_post.create_ip)
        .bind(if new_post.pinned { "Y" } else { "N" })
        .execute(self.pool)
        .await
        .map_err(|e| PlazaError::Database(e.to_string()))?;

        let post_no = result.last_insert_rowid();
        self.get_by_id(post_no)
            .await?
            .ok_or_else(|| PlazaError::NotFound("post".to_string()))
    }

    /// Get a post by its sequence number.
    pub async fn get_by_id(&self, post_no: i64) -> Result<Option<Post>> {
        let result: Option<PostRow> = sqlx::query_as(
            "SELECT post_no, board_id, title, content, writer, author_name, author_email,
                    author_phone, password, status, create_ip, create_dt, update_ip,
                    update_dt, views, top_yn
             FROM posts WHERE post_no = ?",
        )
        .bind(post_no)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| PlazaError::Database(e.to_string()))?;

        Ok(result.map(|row| row.into_post()))
    }

    /// List one page of post summaries for a board.
    ///
    /// Pinned posts sort before unpinned regardless of age; within each
    /// tier, newest first. Pages beyond the end return an empty slice.
    pub async fn list_page(&self, board_id: i64, offset: i64, limit: i64) -> Result<Vec<PostSummary>> {
        let rows: Vec<SummaryRow> = sqlx::query_as(
            "SELECT post_no, title, writer, status, views, top_yn, create_dt
             FROM posts WHERE board_id = ?
             ORDER BY top_yn DESC, create_dt DESC, post_no DESC
             LIMIT ? OFFSET ?",
        )
        .bind(board_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await
        .map_err(|e| PlazaError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(|row| row.into_summary()).collect())
    }

    /// Count posts on a board.
    pub async fn count_by_board(&self, board_id: i64) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts WHERE board_id = ?")
            .bind(board_id)
            .fetch_one(self.pool)
            .await
            .map_err(|e| PlazaError::Database(e.to_string()))?;
        Ok(count.0)
    }

    /// Increment the view counter by one.
    ///
    /// Not idempotent on purpose: the caller invokes this exactly once per
    /// detail-view request. Returns false if the post doesn't exist.
    pub async fn increment_views(&self, post_no: i64) -> Result<bool> {
        let result = sqlx::query("UPDATE posts SET views = views + 1 WHERE post_no = ?")
            .bind(post_no)
            .execute(self.pool)
            .await
            .map_err(|e| PlazaError::Database(e.to_string()))?;
        Ok(result.rows_affected() > 0)
    }

    /// Update a post by sequence number.
    ///
    /// Only fields set in the update are modified; the update timestamp
    /// and actor IP are restamped. Returns the updated post, or None if
    /// not found.
    pub async fn update(
        &self,
        post_no: i64,
        update: &PostUpdate,
        update_ip: &str,
    ) -> Result<Option<Post>> {
        if update.is_empty() {
            return self.get_by_id(post_no).await;
        }

        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE posts SET ");
        let mut separated = query.separated(", ");

        if let Some(ref title) = update.title {
            separated.push("title = ");
            separated.push_bind_unseparated(title);
        }
        if let Some(ref content) = update.content {
            separated.push("content = ");
            separated.push_bind_unseparated(content);
        }
        if let Some(pinned) = update.pinned {
            separated.push("top_yn = ");
            separated.push_bind_unseparated(if pinned { "Y" } else { "N" });
        }
        separated.push("update_dt = datetime('now')");
        separated.push("update_ip = ");
        separated.push_bind_unseparated(update_ip);

        query.push(" WHERE post_no = ");
        query.push_bind(post_no);

        let result = query
            .build()
            .execute(self.pool)
            .await
            .map_err(|e| PlazaError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(post_no).await
    }

    /// Delete a post by sequence number (hard delete, no tombstone).
    ///
    /// Returns true if a post was deleted, false if not found.
    pub async fn delete(&self, post_no: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE post_no = ?")
            .bind(post_no)
            .execute(self.pool)
            .await
            .map_err(|e| PlazaError::Database(e.to_string()))?;
        Ok(result.rows_affected() > 0)
    }

    /// Set a post's workflow status inside an open transaction.
    ///
    /// Used by the reply flow, which commits the reply upsert and this
    /// transition together.
    pub async fn set_status_tx(
        tx: &mut Transaction<'_, Sqlite>,
        post_no: i64,
        status: PostStatus,
    ) -> Result<()> {
        let result = sqlx::query("UPDATE posts SET status = ? WHERE post_no = ?")
            .bind(status.as_str())
            .bind(post_no)
            .execute(&mut **tx)
            .await
            .map_err(|e| PlazaError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(PlazaError::NotFound("post".to_string()));
        }
        Ok(())
    }
}

/// Internal struct for mapping database rows to Post.
#[derive(sqlx::FromRow)]
struct PostRow {
    post_no: i64,
    board_id: i64,
    title: String,
    content: String,
    writer: String,
    author_name: Option<String>,
    author_email: Option<String>,
    author_phone: Option<String>,
    password: Option<String>,
    status: String,
    create_ip: String,
    create_dt: String,
    update_ip: Option<String>,
    update_dt: Option<String>,
    views: i64,
    top_yn: String,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            post_no: self.post_no,
            board_id: self.board_id,
            title: self.title,
            content: self.content,
            writer: self.writer,
            author_name: self.author_name,
            author_email: self.author_email,
            author_phone: self.author_phone,
            password: self.password,
            status: self.status.parse().unwrap_or(PostStatus::Published),
            create_ip: self.create_ip,
            create_dt: self.create_dt,
            update_ip: self.update_ip,
            update_dt: self.update_dt,
            views: self.views,
            pinned: self.top_yn == "Y",
        }
    }
}

/// Internal struct for mapping list rows to PostSummary.
#[derive(sqlx::FromRow)]
struct SummaryRow {
    post_no: i64,
    title: String,
    writer: String,
    status: String,
    views: i64,
    top_yn: String,
    create_dt: String,
}

impl SummaryRow {
    fn into_summary(self) -> PostSummary {
        PostSummary {
            post_no: self.post_no,
            title: self.title,
            writer: self.writer,
            status: self.status.parse().unwrap_or(PostStatus::Published),
            views: self.views,
            pinned: self.top_yn == "Y",
            create_dt: self.create_dt,
        }
    }
}
