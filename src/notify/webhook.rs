//! Webhook notifier.
//!
//! Posts each notification as a JSON document to a configured URL. The
//! receiving side (mail relay, chat hook) is outside this system.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use super::{LeadNotification, Notifier, PostNotification, ReplyNotification};
use crate::{PlazaError, Result};

/// Request timeout for webhook deliveries.
const DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Notifier delivering JSON payloads over HTTP.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    event: &'a str,
    payload: &'a T,
}

impl WebhookNotifier {
    /// Create a notifier delivering to the given URL.
    pub fn new(url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DELIVERY_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            url: url.into(),
        }
    }

    async fn deliver<T: Serialize>(&self, event: &str, payload: &T) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .json(&Envelope { event, payload })
            .send()
            .await
            .map_err(|e| PlazaError::Notification(format!("{event} delivery failed: {e}")))?;

        response
            .error_for_status()
            .map_err(|e| PlazaError::Notification(format!("{event} delivery rejected: {e}")))?;

        Ok(())
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify_new_post(&self, post: &PostNotification) -> Result<()> {
        self.deliver("new_post", post).await
    }

    async fn notify_new_reply(&self, reply: &ReplyNotification) -> Result<()> {
        self.deliver("new_reply", reply).await
    }

    async fn notify_new_lead(&self, lead: &LeadNotification) -> Result<()> {
        self.deliver("new_lead", lead).await
    }
}
