//! Consultation service for plaza.
//!
//! Franchise-inquiry leads get the same privacy treatment as gated posts:
//! contact fields are encrypted before storage and decrypted only for the
//! admin console.

use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::warn;

use super::repository::LeadRepository;
use super::types::{
    ConsultationLead, DecryptedLead, LeadPage, LeadStatus, LeadSubmission, NewLead,
};
use crate::notify::{LeadNotification, Notifier};
use crate::privacy::{format_phone, strip_phone, FieldCodec};
use crate::{PlazaError, Result};

/// Service over the consultation subsystem.
#[derive(Clone)]
pub struct ConsultationService {
    pool: SqlitePool,
    codec: Arc<FieldCodec>,
    notifier: Arc<dyn Notifier>,
}

impl ConsultationService {
    /// Create a new consultation service.
    pub fn new(pool: SqlitePool, codec: Arc<FieldCodec>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            pool,
            codec,
            notifier,
        }
    }

    /// Submit a consultation lead.
    pub async fn submit_lead(
        &self,
        submission: LeadSubmission,
        create_ip: &str,
    ) -> Result<ConsultationLead> {
        if submission.name.trim().is_empty() {
            return Err(PlazaError::Validation("name is required".to_string()));
        }
        let phone_digits = strip_phone(&submission.phone);
        if !(9..=11).contains(&phone_digits.len()) {
            return Err(PlazaError::Validation(
                "phone number must be 9 to 11 digits".to_string(),
            ));
        }

        let new_lead = NewLead {
            name: self.codec.encrypt(submission.name.trim()),
            phone: self.codec.encrypt(&phone_digits),
            email: submission
                .email
                .as_deref()
                .filter(|e| !e.trim().is_empty())
                .map(|e| self.codec.encrypt(e.trim())),
            region: submission.region.clone(),
            budget: submission.budget.clone(),
            experience: submission.experience.clone(),
            path: submission.path.clone(),
            message: submission.message.clone(),
            create_ip: create_ip.to_string(),
        };

        let repo = LeadRepository::new(&self.pool);
        let lead = repo.create(&new_lead).await?;

        let notification = LeadNotification {
            name: submission.name.trim().to_string(),
            phone: format_phone(&phone_digits),
            email: submission.email.unwrap_or_default(),
            region: submission.region,
            budget: submission.budget,
            experience: submission.experience,
            path: submission.path,
            message: submission.message,
        };
        if let Err(e) = self.notifier.notify_new_lead(&notification).await {
            warn!(lead_id = lead.id, "new-lead notification failed: {}", e);
        }

        Ok(lead)
    }

    /// List one page of leads with contact fields decrypted, newest first.
    pub async fn list_leads(&self, page: u32, per_page: u32) -> Result<LeadPage> {
        let page = page.max(1);
        let per_page = if per_page == 0 { 10 } else { per_page };

        let repo = LeadRepository::new(&self.pool);
        let offset = i64::from(page - 1) * i64::from(per_page);
        let leads = repo.list_page(offset, i64::from(per_page)).await?;
        let total = repo.count().await?;

        Ok(LeadPage {
            leads: leads.into_iter().map(|l| self.decrypt_lead(l)).collect(),
            page,
            per_page,
            total,
        })
    }

    /// Get one lead with contact fields decrypted.
    pub async fn get_lead(&self, id: i64) -> Result<DecryptedLead> {
        let repo = LeadRepository::new(&self.pool);
        let lead = repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| PlazaError::NotFound("consultation lead".to_string()))?;
        Ok(self.decrypt_lead(lead))
    }

    /// Update a lead's workflow status.
    pub async fn update_status(&self, id: i64, status: LeadStatus) -> Result<()> {
        let repo = LeadRepository::new(&self.pool);
        if !repo.update_status(id, status).await? {
            return Err(PlazaError::NotFound("consultation lead".to_string()));
        }
        Ok(())
    }

    fn decrypt_lead(&self, lead: ConsultationLead) -> DecryptedLead {
        DecryptedLead {
            id: lead.id,
            name: self.codec.decrypt_or_unavailable(&lead.name),
            phone: format_phone(&self.codec.decrypt_or_unavailable(&lead.phone)),
            email: lead
                .email
                .as_deref()
                .map(|t| self.codec.decrypt_or_unavailable(t))
                .unwrap_or_default(),
            region: lead.region,
            budget: lead.budget,
            experience: lead.experience,
            path: lead.path,
            message: lead.message,
            status: lead.status,
            create_ip: lead.create_ip,
            created_at: lead.created_at,
            updated_at: lead.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use crate::Database;

    const TEST_KEY: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

    async fn setup() -> (Database, ConsultationService, Arc<RecordingNotifier>) {
        let db = Database::open_in_memory().await.unwrap();
        let codec = Arc::new(FieldCodec::from_hex(TEST_KEY).unwrap());
        let notifier = Arc::new(RecordingNotifier::new());
        let service = ConsultationService::new(db.pool().clone(), codec, notifier.clone());
        (db, service, notifier)
    }

    fn submission() -> LeadSubmission {
        LeadSubmission {
            name: "Park".to_string(),
            phone: "010-2222-3333".to_string(),
            email: Some("park@example.com".to_string()),
            region: Some("Busan".to_string()),
            budget: Some("80m".to_string()),
            experience: Some("none".to_string()),
            path: Some("search".to_string()),
            message: Some("call me".to_string()),
        }
    }

    #[tokio::test]
    async fn test_submit_encrypts_contact_fields() {
        let (_db, service, notifier) = setup().await;

        let lead = service.submit_lead(submission(), "1.2.3.4").await.unwrap();

        assert_eq!(lead.status, LeadStatus::Pending);
        assert!(!lead.name.contains("Park"));
        assert!(!lead.phone.contains("0102222"));
        assert!(lead.name.contains(':'));
        // Plain business fields stay readable.
        assert_eq!(lead.region.as_deref(), Some("Busan"));
        assert_eq!(notifier.lead_count(), 1);
    }

    #[tokio::test]
    async fn test_submit_requires_name_and_phone() {
        let (_db, service, _) = setup().await;

        let mut s = submission();
        s.name = " ".to_string();
        assert!(matches!(
            service.submit_lead(s, "1.2.3.4").await,
            Err(PlazaError::Validation(_))
        ));

        let mut s = submission();
        s.phone = "123".to_string();
        assert!(matches!(
            service.submit_lead(s, "1.2.3.4").await,
            Err(PlazaError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_list_decrypts_for_admin() {
        let (_db, service, _) = setup().await;
        service.submit_lead(submission(), "1.2.3.4").await.unwrap();

        let page = service.list_leads(1, 10).await.unwrap();
        assert_eq!(page.total, 1);
        let lead = &page.leads[0];
        assert_eq!(lead.name, "Park");
        assert_eq!(lead.phone, "010-2222-3333");
        assert_eq!(lead.email, "park@example.com");
    }

    #[tokio::test]
    async fn test_update_status_flow() {
        let (_db, service, _) = setup().await;
        let lead = service.submit_lead(submission(), "1.2.3.4").await.unwrap();

        service
            .update_status(lead.id, LeadStatus::InProgress)
            .await
            .unwrap();
        let reloaded = service.get_lead(lead.id).await.unwrap();
        assert_eq!(reloaded.status, LeadStatus::InProgress);

        assert!(matches!(
            service.update_status(999, LeadStatus::Done).await,
            Err(PlazaError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_lead_without_email() {
        let (_db, service, _) = setup().await;
        let mut s = submission();
        s.email = None;
        let lead = service.submit_lead(s, "1.2.3.4").await.unwrap();
        assert!(lead.email.is_none());

        let page = service.list_leads(1, 10).await.unwrap();
        assert_eq!(page.leads[0].email, "");
    }
}
