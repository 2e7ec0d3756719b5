//! # Notification fan-out
//!
//! [`Dispatcher::dispatch`] spawns one task per channel and joins them. Each
//! task catches its own failure (an error or a panic) and turns it into a
//! `false` flag, so the outcome of one channel cannot affect another. There
//! is no retry and no de-duplication: dispatching the same event twice sends
//! everything twice.

use eyre::Result;
use reqwest::Client;
use salonbook_core::models::booking::DeliveryReport;
use std::{sync::Arc, time::Duration};
use tracing::{info, warn};

use crate::{
    channels::{
        ChannelKind, DisabledChannel, EmailChannel, LogChannel, NotificationChannel,
        PushChannel, WhatsAppChannel,
    },
    config::NotifyConfig,
    BookingEvent,
};

/// Upper bound on a single provider request.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct Dispatcher {
    email: Arc<dyn NotificationChannel>,
    push: Arc<dyn NotificationChannel>,
    whatsapp: Arc<dyn NotificationChannel>,
}

impl Dispatcher {
    pub fn new(
        email: Arc<dyn NotificationChannel>,
        push: Arc<dyn NotificationChannel>,
        whatsapp: Arc<dyn NotificationChannel>,
    ) -> Self {
        Self {
            email,
            push,
            whatsapp,
        }
    }

    /// Builds the dispatcher for the given configuration.
    ///
    /// In development mode every channel only logs. Otherwise each configured
    /// provider gets its HTTP channel and unconfigured ones are disabled.
    /// Every provider request gives up after `provider_timeout`.
    pub fn from_config(
        config: &NotifyConfig,
        dev_mode: bool,
        provider_timeout: Duration,
    ) -> Result<Self> {
        if dev_mode {
            info!("Development mode: notifications are logged, not delivered");
            return Ok(Self::new(
                Arc::new(LogChannel::new(ChannelKind::Email, &config.business_name)),
                Arc::new(LogChannel::new(ChannelKind::Push, &config.business_name)),
                Arc::new(LogChannel::new(ChannelKind::WhatsApp, &config.business_name)),
            ));
        }

        let client = Client::builder().timeout(provider_timeout).build()?;

        let email: Arc<dyn NotificationChannel> = match &config.email {
            Some(settings) => Arc::new(EmailChannel::new(
                client.clone(),
                settings.clone(),
                &config.business_name,
            )),
            None => {
                warn!("Email channel is not configured");
                Arc::new(DisabledChannel::new(ChannelKind::Email.name()))
            }
        };

        let push: Arc<dyn NotificationChannel> = match &config.push {
            Some(settings) => Arc::new(PushChannel::new(client.clone(), settings.clone())),
            None => {
                warn!("Push channel is not configured");
                Arc::new(DisabledChannel::new(ChannelKind::Push.name()))
            }
        };

        let whatsapp: Arc<dyn NotificationChannel> = match &config.whatsapp {
            Some(settings) => Arc::new(WhatsAppChannel::new(
                client,
                settings.clone(),
                &config.business_name,
            )),
            None => {
                warn!("WhatsApp channel is not configured");
                Arc::new(DisabledChannel::new(ChannelKind::WhatsApp.name()))
            }
        };

        Ok(Self::new(email, push, whatsapp))
    }

    /// Attempts every channel and reports which ones delivered.
    pub async fn dispatch(&self, event: BookingEvent) -> DeliveryReport {
        let event = Arc::new(event);

        let email = tokio::spawn(attempt(self.email.clone(), event.clone()));
        let push = tokio::spawn(attempt(self.push.clone(), event.clone()));
        let whatsapp = tokio::spawn(attempt(self.whatsapp.clone(), event.clone()));

        let (email, push, whatsapp) = tokio::join!(email, push, whatsapp);

        let report = DeliveryReport {
            email_sent: joined("email", email),
            notification_sent: joined("push", push),
            whatsapp_sent: joined("whatsapp", whatsapp),
        };

        info!(
            event = event.kind(),
            email_sent = report.email_sent,
            notification_sent = report.notification_sent,
            whatsapp_sent = report.whatsapp_sent,
            "Notification dispatch finished"
        );

        report
    }
}

async fn attempt(channel: Arc<dyn NotificationChannel>, event: Arc<BookingEvent>) -> bool {
    match channel.deliver(&event).await {
        Ok(()) => true,
        Err(e) => {
            warn!(
                channel = channel.name(),
                event = event.kind(),
                "Notification failed: {:#}",
                e
            );
            false
        }
    }
}

fn joined(channel: &str, result: Result<bool, tokio::task::JoinError>) -> bool {
    result.unwrap_or_else(|e| {
        warn!(channel = channel, "Notification task aborted: {}", e);
        false
    })
}
