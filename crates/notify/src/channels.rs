use async_trait::async_trait;
use eyre::{eyre, Result};

use crate::BookingEvent;

pub mod email;
pub mod log;
pub mod push;
pub mod whatsapp;

pub use email::EmailChannel;
pub use log::LogChannel;
pub use push::PushChannel;
pub use whatsapp::WhatsAppChannel;

/// The three places a booking event is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// Customer email
    Email,
    /// Owner push notification
    Push,
    /// Owner WhatsApp message
    WhatsApp,
}

impl ChannelKind {
    pub fn name(&self) -> &'static str {
        match self {
            ChannelKind::Email => "email",
            ChannelKind::Push => "push",
            ChannelKind::WhatsApp => "whatsapp",
        }
    }
}

/// One delivery path for booking events.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    async fn deliver(&self, event: &BookingEvent) -> Result<()>;
}

/// Stands in for a channel whose provider is not configured. Every delivery fails.
#[derive(Debug, Clone)]
pub struct DisabledChannel {
    name: &'static str,
}

impl DisabledChannel {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

#[async_trait]
impl NotificationChannel for DisabledChannel {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn deliver(&self, _event: &BookingEvent) -> Result<()> {
        Err(eyre!("{} channel is not configured", self.name))
    }
}

/// Turns a non-2xx provider response into an error carrying the response body.
pub(crate) async fn ensure_success(provider: &str, response: reqwest::Response) -> Result<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.text().await.unwrap_or_default();
    Err(eyre!("{} API returned {}: {}", provider, status, body))
}
