//! Reply repository for plaza.
//!
//! Maintains the at-most-one-reply-per-post guarantee through upsert. The
//! upsert runs inside a caller-owned transaction so it can commit together
//! with the owning post's status transition.

use sqlx::sqlite::SqlitePool;
use sqlx::{Sqlite, Transaction};

use super::reply::{Reply, ReplyOutcome};
use crate::{PlazaError, Result};

/// Repository for reply operations.
pub struct ReplyRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ReplyRepository<'a> {
    /// Create a new ReplyRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the current reply for a post, if any.
    pub async fn get_by_post(&self, post_no: i64) -> Result<Option<Reply>> {
        let result: Option<ReplyRow> = sqlx::query_as(
            "SELECT id, post_no, reply_content, admin_id, created_at, updated_at
             FROM replies WHERE post_no = ?
             ORDER BY created_at DESC, id DESC LIMIT 1",
        )
        .bind(post_no)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| PlazaError::Database(e.to_string()))?;

        Ok(result.map(|row| row.into_reply()))
    }

    /// Count reply rows for a post.
    pub async fn count_by_post(&self, post_no: i64) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM replies WHERE post_no = ?")
            .bind(post_no)
            .fetch_one(self.pool)
            .await
            .map_err(|e| PlazaError::Database(e.to_string()))?;
        Ok(count.0)
    }

    /// Insert or update the reply for a post inside an open transaction.
    ///
    /// An existing reply gets its body and updated-timestamp replaced (the
    /// last write wins); otherwise a new row is inserted stamped with the
    /// acting admin. The returned outcome tells the caller whether this
    /// was the first creation.
    pub async fn upsert_tx(
        tx: &mut Transaction<'_, Sqlite>,
        post_no: i64,
        body: &str,
        admin_id: i64,
    ) -> Result<ReplyOutcome> {
        let existing: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM replies WHERE post_no = ? LIMIT 1")
                .bind(post_no)
                .fetch_optional(&mut **tx)
                .await
                .map_err(|e| PlazaError::Database(e.to_string()))?;

        match existing {
            Some(_) => {
                sqlx::query(
                    "UPDATE replies SET reply_content = ?, updated_at = datetime('now')
                     WHERE post_no = ?",
                )
                .bind(body)
                .bind(post_no)
                .execute(&mut **tx)
                .await
                .map_err(|e| PlazaError::Database(e.to_string()))?;
                Ok(ReplyOutcome::Updated)
            }
            None => {
                sqlx::query(
                    "INSERT INTO replies (post_no, reply_content, admin_id) VALUES (?, ?, ?)",
                )
                .bind(post_no)
                .bind(body)
                .bind(admin_id)
                .execute(&mut **tx)
                .await
                .map_err(|e| PlazaError::Database(e.to_string()))?;
                Ok(ReplyOutcome::Created)
            }
        }
    }
}

/// Internal struct for mapping database rows to Reply.
#[derive(sqlx::FromRow)]
struct ReplyRow {
    id: i64,
    post_no: i64,
    reply_content: String,
    admin_id: i64,
    created_at: String,
    updated_at: String,
}

impl ReplyRow {
    fn into_reply(self) -> Reply {
        Reply {
            id: self.id,
            post_no: self.post_no,
            reply_content: self.reply_content,
            admin_id: self.admin_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardCategory, BoardDirectory, NewInquiryPost, PostRepository};
    use crate::Database;

    async fn setup_post() -> (Database, i64) {
        let db = Database::open_in_memory().await.unwrap();
        let board_id = BoardDirectory::new(db.pool())
            .resolve(1, BoardCategory::Inquiry)
            .await
            .unwrap()
            .unwrap();
        let post = PostRepository::new(db.pool())
            .create_inquiry(&NewInquiryPost {
                board_id,
                title: "Q".to_string(),
                content: "help".to_string(),
                writer: "Kim".to_string(),
                author_name: "aa:bb".to_string(),
                author_email: "cc:dd".to_string(),
                author_phone: "ee:ff".to_string(),
                password: "$argon2id$fake".to_string(),
                create_ip: "127.0.0.1".to_string(),
            })
            .await
            .unwrap();
        (db, post.post_no)
    }

    #[tokio::test]
    async fn test_upsert_creates_then_updates() {
        let (db, post_no) = setup_post().await;
        let repo = ReplyRepository::new(db.pool());

        let mut tx = db.pool().begin().await.unwrap();
        let first = ReplyRepository::upsert_tx(&mut tx, post_no, "first answer", 1)
            .await
            .unwrap();
        tx.commit().await.unwrap();
        assert_eq!(first, ReplyOutcome::Created);

        let mut tx = db.pool().begin().await.unwrap();
        let second = ReplyRepository::upsert_tx(&mut tx, post_no, "edited answer", 1)
            .await
            .unwrap();
        tx.commit().await.unwrap();
        assert_eq!(second, ReplyOutcome::Updated);

        // Exactly one row; the second call's body wins.
        assert_eq!(repo.count_by_post(post_no).await.unwrap(), 1);
        let reply = repo.get_by_post(post_no).await.unwrap().unwrap();
        assert_eq!(reply.reply_content, "edited answer");
        assert_eq!(reply.admin_id, 1);
    }

    #[tokio::test]
    async fn test_get_by_post_missing() {
        let (db, post_no) = setup_post().await;
        let repo = ReplyRepository::new(db.pool());
        assert!(repo.get_by_post(post_no).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rollback_discards_reply() {
        // Simulates the second write of the reply/status pair failing: the
        // transaction is dropped without commit and the reply must vanish
        // with it.
        let (db, post_no) = setup_post().await;
        let repo = ReplyRepository::new(db.pool());

        {
            let mut tx = db.pool().begin().await.unwrap();
            let outcome = ReplyRepository::upsert_tx(&mut tx, post_no, "doomed", 1)
                .await
                .unwrap();
            assert_eq!(outcome, ReplyOutcome::Created);
            // Dropped without commit
        }

        assert_eq!(repo.count_by_post(post_no).await.unwrap(), 0);
        assert!(repo.get_by_post(post_no).await.unwrap().is_none());
    }
}
