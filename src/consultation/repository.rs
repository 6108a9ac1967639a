//! Consultation lead repository for plaza.

use sqlx::sqlite::SqlitePool;

use super::types::{ConsultationLead, LeadStatus, NewLead};
use crate::{PlazaError, Result};

/// Repository for consultation lead operations.
pub struct LeadRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> LeadRepository<'a> {
    /// Create a new LeadRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new lead. Status starts at `pending`.
    pub async fn create(&self, new_lead: &NewLead) -> Result<ConsultationLead> {
        let result = sqlx::query(
            "INSERT INTO consultation
             (name, phone, email, region, budget, experience, path, message, status, create_ip)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, 'pending', ?)",
        )
        .bind(&new_lead.name)
        .bind(&new_lead.phone)
        .bind(&new_lead.email)
        .bind(&new_lead.region)
        .bind(&new_lead.budget)
        .bind(&new_lead.experience)
        .bind(&new_lead.path)
        .bind(&new_lead.message)
        .bind(&new_lead.create_ip)
        .execute(self.pool)
        .await
        .map_err(|e| PlazaError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| PlazaError::NotFound("consultation lead".to_string()))
    }

    /// Get a lead by id.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<ConsultationLead>> {
        let result: Option<LeadRow> = sqlx::query_as(
            "SELECT id, name, phone, email, region, budget, experience, path, message,
                    status, create_ip, created_at, updated_at
             FROM consultation WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| PlazaError::Database(e.to_string()))?;

        Ok(result.map(|row| row.into_lead()))
    }

    /// List one page of leads, newest first.
    pub async fn list_page(&self, offset: i64, limit: i64) -> Result<Vec<ConsultationLead>> {
        let rows: Vec<LeadRow> = sqlx::query_as(
            "SELECT id, name, phone, email, region, budget, experience, path, message,
                    status, create_ip, created_at, updated_at
             FROM consultation
             ORDER BY created_at DESC, id DESC
             LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await
        .map_err(|e| PlazaError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(|row| row.into_lead()).collect())
    }

    /// Count all leads.
    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM consultation")
            .fetch_one(self.pool)
            .await
            .map_err(|e| PlazaError::Database(e.to_string()))?;
        Ok(count.0)
    }

    /// Update a lead's workflow status.
    ///
    /// Returns false if the lead doesn't exist.
    pub async fn update_status(&self, id: i64, status: LeadStatus) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE consultation SET status = ?, updated_at = datetime('now') WHERE id = ?",
        )
        .bind(status.as_str())
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(|e| PlazaError::Database(e.to_string()))?;
        Ok(result.rows_affected() > 0)
    }
}

/// Internal struct for mapping database rows to ConsultationLead.
#[derive(sqlx::FromRow)]
struct LeadRow {
    id: i64,
    name: String,
    phone: String,
    email: Option<String>,
    region: Option<String>,
    budget: Option<String>,
    experience: Option<String>,
    path: Option<String>,
    message: Option<String>,
    status: String,
    create_ip: String,
    created_at: String,
    updated_at: Option<String>,
}

impl LeadRow {
    fn into_lead(self) -> ConsultationLead {
        ConsultationLead {
            id: self.id,
            name: self.name,
            phone: self.phone,
            email: self.email,
            region: self.region,
            budget: self.budget,
            experience: self.experience,
            path: self.path,
            message: self.message,
            status: self.status.parse().unwrap_or(LeadStatus::Pending),
            create_ip: self.create_ip,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    fn lead(name: &str) -> NewLead {
        NewLead {
            name: name.to_string(),
            phone: "aa:bb".to_string(),
            email: Some("cc:dd".to_string()),
            region: Some("Seoul".to_string()),
            budget: Some("50m".to_string()),
            experience: None,
            path: Some("search".to_string()),
            message: Some("interested".to_string()),
            create_ip: "127.0.0.1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_defaults() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = LeadRepository::new(db.pool());

        let created = repo.create(&lead("tok1")).await.unwrap();
        assert_eq!(created.status, LeadStatus::Pending);
        assert_eq!(created.region.as_deref(), Some("Seoul"));
        assert!(created.updated_at.is_none());
    }

    #[tokio::test]
    async fn test_list_and_count() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = LeadRepository::new(db.pool());

        for i in 0..3 {
            repo.create(&lead(&format!("tok{i}"))).await.unwrap();
        }

        assert_eq!(repo.count().await.unwrap(), 3);
        let page = repo.list_page(0, 2).await.unwrap();
        assert_eq!(page.len(), 2);
        // Newest first
        assert_eq!(page[0].name, "tok2");

        let past_end = repo.list_page(10, 2).await.unwrap();
        assert!(past_end.is_empty());
    }

    #[tokio::test]
    async fn test_update_status() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = LeadRepository::new(db.pool());
        let created = repo.create(&lead("tok")).await.unwrap();

        assert!(repo.update_status(created.id, LeadStatus::Done).await.unwrap());
        let reloaded = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(reloaded.status, LeadStatus::Done);
        assert!(reloaded.updated_at.is_some());

        assert!(!repo.update_status(999, LeadStatus::Done).await.unwrap());
    }
}
