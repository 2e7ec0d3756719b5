use async_trait::async_trait;
use eyre::Result;
use reqwest::Client;
use tracing::debug;

use super::{ensure_success, NotificationChannel};
use crate::{config::PushSettings, message, BookingEvent};

/// Pushes a short notice to the owner's devices via a webhook (`{title, body}`).
#[derive(Debug, Clone)]
pub struct PushChannel {
    client: Client,
    settings: PushSettings,
}

impl PushChannel {
    pub fn new(client: Client, settings: PushSettings) -> Self {
        Self { client, settings }
    }
}

#[async_trait]
impl NotificationChannel for PushChannel {
    fn name(&self) -> &'static str {
        "push"
    }

    async fn deliver(&self, event: &BookingEvent) -> Result<()> {
        let push = message::owner_push(event);
        debug!("Sending {} push: {}", event.kind(), push.title);

        let response = self
            .client
            .post(&self.settings.api_url)
            .bearer_auth(&self.settings.api_token)
            .json(&push)
            .send()
            .await?;

        ensure_success("push", response).await
    }
}
