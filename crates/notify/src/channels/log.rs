use async_trait::async_trait;
use eyre::Result;
use tracing::info;

use super::{ChannelKind, NotificationChannel};
use crate::{message, BookingEvent};

/// Logs the message it would have sent. Used for every channel in development mode.
#[derive(Debug, Clone)]
pub struct LogChannel {
    kind: ChannelKind,
    business_name: String,
}

impl LogChannel {
    pub fn new(kind: ChannelKind, business_name: impl Into<String>) -> Self {
        Self {
            kind,
            business_name: business_name.into(),
        }
    }
}

#[async_trait]
impl NotificationChannel for LogChannel {
    fn name(&self) -> &'static str {
        self.kind.name()
    }

    async fn deliver(&self, event: &BookingEvent) -> Result<()> {
        let text = match self.kind {
            ChannelKind::Email => message::customer_email(event, &self.business_name).subject,
            ChannelKind::Push => message::owner_push(event).body,
            ChannelKind::WhatsApp => message::owner_whatsapp(event, &self.business_name),
        };
        info!(
            channel = self.kind.name(),
            event = event.kind(),
            "development mode, not delivering: {}",
            text
        );
        Ok(())
    }
}
