use async_trait::async_trait;
use eyre::Result;
use reqwest::Client;
use serde_json::json;
use tracing::debug;

use super::{ensure_success, NotificationChannel};
use crate::{config::EmailSettings, message, BookingEvent};

/// Sends the customer an email through an HTTP transactional-email API.
///
/// The request is `POST {api_url}` with a bearer key and a JSON body of
/// `{from, to, subject, html}`.
#[derive(Debug, Clone)]
pub struct EmailChannel {
    client: Client,
    settings: EmailSettings,
    business_name: String,
}

impl EmailChannel {
    pub fn new(client: Client, settings: EmailSettings, business_name: impl Into<String>) -> Self {
        Self {
            client,
            settings,
            business_name: business_name.into(),
        }
    }
}

#[async_trait]
impl NotificationChannel for EmailChannel {
    fn name(&self) -> &'static str {
        "email"
    }

    async fn deliver(&self, event: &BookingEvent) -> Result<()> {
        let email = message::customer_email(event, &self.business_name);
        debug!("Sending {} email to {}", event.kind(), email.to);

        let response = self
            .client
            .post(&self.settings.api_url)
            .bearer_auth(&self.settings.api_key)
            .json(&json!({
                "from": self.settings.from,
                "to": [email.to],
                "subject": email.subject,
                "html": email.html,
            }))
            .send()
            .await?;

        ensure_success("email", response).await
    }
}
