//! Outbound notifications for plaza.
//!
//! The notifier is an external collaborator: store operations fire it
//! after their own write succeeds, catch and log any failure, and never
//! let the outcome leak into their own result.

pub mod webhook;

pub use webhook::WebhookNotifier;

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Mutex;

use crate::Result;

/// Payload for a newly submitted post.
#[derive(Debug, Clone, Serialize)]
pub struct PostNotification {
    /// Category tag of the owning board.
    pub category: String,
    /// Human-facing board title.
    pub board_title: String,
    /// Post sequence number.
    pub post_no: i64,
    /// Post title.
    pub title: String,
    /// Display name of the writer.
    pub writer: String,
}

/// Payload for a first-time admin reply, addressed to the post's author.
#[derive(Debug, Clone, Serialize)]
pub struct ReplyNotification {
    /// Category tag of the owning board.
    pub category: String,
    /// Post sequence number.
    pub post_no: i64,
    /// Title of the answered post.
    pub post_title: String,
    /// Decrypted author name.
    pub author_name: String,
    /// Decrypted author email.
    pub author_email: String,
    /// The answer body.
    pub reply_content: String,
}

/// Payload for a new consultation lead.
#[derive(Debug, Clone, Serialize)]
pub struct LeadNotification {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub region: Option<String>,
    pub budget: Option<String>,
    pub experience: Option<String>,
    pub path: Option<String>,
    pub message: Option<String>,
}

/// Outbound notification interface.
///
/// Implementations may fail; callers wrap every call in catch-and-log.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// A post was submitted to a board.
    async fn notify_new_post(&self, post: &PostNotification) -> Result<()>;

    /// A post received its first admin reply.
    async fn notify_new_reply(&self, reply: &ReplyNotification) -> Result<()>;

    /// A consultation lead was submitted.
    async fn notify_new_lead(&self, lead: &LeadNotification) -> Result<()>;
}

/// Notifier that discards everything.
///
/// Used when no webhook URL is configured.
#[derive(Debug, Default)]
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn notify_new_post(&self, _post: &PostNotification) -> Result<()> {
        Ok(())
    }

    async fn notify_new_reply(&self, _reply: &ReplyNotification) -> Result<()> {
        Ok(())
    }

    async fn notify_new_lead(&self, _lead: &LeadNotification) -> Result<()> {
        Ok(())
    }
}

/// A notification observed by [`RecordingNotifier`].
#[derive(Debug, Clone)]
pub enum NotificationEvent {
    NewPost(PostNotification),
    NewReply(ReplyNotification),
    NewLead(LeadNotification),
}

/// In-memory notifier for tests: records every event it receives.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<NotificationEvent>>,
}

impl RecordingNotifier {
    /// Create an empty recording notifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events.
    pub fn events(&self) -> Vec<NotificationEvent> {
        self.events.lock().expect("notifier lock").clone()
    }

    /// Number of recorded reply notifications.
    pub fn reply_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, NotificationEvent::NewReply(_)))
            .count()
    }

    /// Number of recorded post notifications.
    pub fn post_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, NotificationEvent::NewPost(_)))
            .count()
    }

    /// Number of recorded lead notifications.
    pub fn lead_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, NotificationEvent::NewLead(_)))
            .count()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify_new_post(&self, post: &PostNotification) -> Result<()> {
        self.events
            .lock()
            .expect("notifier lock")
            .push(NotificationEvent::NewPost(post.clone()));
        Ok(())
    }

    async fn notify_new_reply(&self, reply: &ReplyNotification) -> Result<()> {
        self.events
            .lock()
            .expect("notifier lock")
            .push(NotificationEvent::NewReply(reply.clone()));
        Ok(())
    }

    async fn notify_new_lead(&self, lead: &LeadNotification) -> Result<()> {
        self.events
            .lock()
            .expect("notifier lock")
            .push(NotificationEvent::NewLead(lead.clone()));
        Ok(())
    }
}

/// Notifier that always fails.
///
/// Lets tests prove that notifier outages never fail the triggering store
/// operation.
#[derive(Debug, Default)]
pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn notify_new_post(&self, _post: &PostNotification) -> Result<()> {
        Err(crate::PlazaError::Notification("notifier down".to_string()))
    }

    async fn notify_new_reply(&self, _reply: &ReplyNotification) -> Result<()> {
        Err(crate::PlazaError::Notification("notifier down".to_string()))
    }

    async fn notify_new_lead(&self, _lead: &LeadNotification) -> Result<()> {
        Err(crate::PlazaError::Notification("notifier down".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recording_notifier_counts() {
        let notifier = RecordingNotifier::new();

        notifier
            .notify_new_post(&PostNotification {
                category: "inquiry".to_string(),
                board_title: "Inquiries".to_string(),
                post_no: 1,
                title: "Q".to_string(),
                writer: "Kim".to_string(),
            })
            .await
            .unwrap();
        notifier
            .notify_new_reply(&ReplyNotification {
                category: "inquiry".to_string(),
                post_no: 1,
                post_title: "Q".to_string(),
                author_name: "Kim".to_string(),
                author_email: "kim@example.com".to_string(),
                reply_content: "A".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(notifier.post_count(), 1);
        assert_eq!(notifier.reply_count(), 1);
        assert_eq!(notifier.lead_count(), 0);
        assert_eq!(notifier.events().len(), 2);
    }

    #[tokio::test]
    async fn test_noop_notifier_succeeds() {
        let notifier = NoopNotifier;
        let lead = LeadNotification {
            name: "Kim".to_string(),
            phone: "010-1111-2222".to_string(),
            email: "kim@example.com".to_string(),
            region: None,
            budget: None,
            experience: None,
            path: None,
            message: None,
        };
        assert!(notifier.notify_new_lead(&lead).await.is_ok());
    }

    #[tokio::test]
    async fn test_failing_notifier_fails() {
        let notifier = FailingNotifier;
        let post = PostNotification {
            category: "voice".to_string(),
            board_title: "Customer Voice".to_string(),
            post_no: 2,
            title: "t".to_string(),
            writer: "w".to_string(),
        };
        assert!(notifier.notify_new_post(&post).await.is_err());
    }
}
