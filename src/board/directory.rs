//! Board directory for plaza.
//!
//! Resolves a tenant-scoped board id from a category tag. A missing board
//! is a legitimate outcome (the tenant may not have provisioned that
//! category), so callers degrade to an empty listing rather than an error.

use sqlx::SqlitePool;

use super::types::{Board, BoardCategory};
use crate::{PlazaError, Result};

/// Read-only lookup over the boards table.
pub struct BoardDirectory<'a> {
    pool: &'a SqlitePool,
}

impl<'a> BoardDirectory<'a> {
    /// Create a new BoardDirectory with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Resolve a board id for the given tenant and category.
    pub async fn resolve(&self, company_id: i64, category: BoardCategory) -> Result<Option<i64>> {
        let result: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM boards WHERE company_id = ? AND category = ? LIMIT 1")
                .bind(company_id)
                .bind(category.as_str())
                .fetch_optional(self.pool)
                .await
                .map_err(|e| PlazaError::Database(e.to_string()))?;

        Ok(result.map(|row| row.0))
    }

    /// Get the full board row for a board id.
    pub async fn get_by_id(&self, board_id: i64) -> Result<Option<Board>> {
        let result: Option<(i64, i64, String, String)> =
            sqlx::query_as("SELECT id, company_id, category, created_at FROM boards WHERE id = ?")
                .bind(board_id)
                .fetch_optional(self.pool)
                .await
                .map_err(|e| PlazaError::Database(e.to_string()))?;

        Ok(result.and_then(|(id, company_id, category, created_at)| {
            category.parse().ok().map(|category| Board {
                id,
                company_id,
                category,
                created_at,
            })
        }))
    }

    /// Look up the category of the board owning a post.
    pub async fn category_of_post(&self, post_no: i64) -> Result<Option<BoardCategory>> {
        let result: Option<(String,)> = sqlx::query_as(
            "SELECT b.category FROM boards b
             JOIN posts p ON p.board_id = b.id
             WHERE p.post_no = ?",
        )
        .bind(post_no)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| PlazaError::Database(e.to_string()))?;

        Ok(result.and_then(|(category,)| category.parse().ok()))
    }
}
