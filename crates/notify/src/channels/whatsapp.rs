use async_trait::async_trait;
use eyre::Result;
use reqwest::Client;
use serde_json::json;
use tracing::debug;

use super::{ensure_success, NotificationChannel};
use crate::{config::WhatsAppSettings, message, BookingEvent};

/// Messages the owner through the WhatsApp Cloud API.
#[derive(Debug, Clone)]
pub struct WhatsAppChannel {
    client: Client,
    settings: WhatsAppSettings,
    business_name: String,
}

impl WhatsAppChannel {
    pub fn new(client: Client, settings: WhatsAppSettings, business_name: impl Into<String>) -> Self {
        Self {
            client,
            settings,
            business_name: business_name.into(),
        }
    }

    fn messages_url(&self) -> String {
        format!("{}/{}/messages", self.settings.api_url, self.settings.phone_number_id)
    }
}

#[async_trait]
impl NotificationChannel for WhatsAppChannel {
    fn name(&self) -> &'static str {
        "whatsapp"
    }

    async fn deliver(&self, event: &BookingEvent) -> Result<()> {
        let body = message::owner_whatsapp(event, &self.business_name);
        debug!("Sending {} WhatsApp message to owner", event.kind());

        let response = self
            .client
            .post(self.messages_url())
            .bearer_auth(&self.settings.token)
            .json(&json!({
                "messaging_product": "whatsapp",
                "to": self.settings.owner_number,
                "type": "text",
                "text": { "body": body },
            }))
            .send()
            .await?;

        ensure_success("whatsapp", response).await
    }
}
