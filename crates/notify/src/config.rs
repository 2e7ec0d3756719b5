//! # Notification configuration
//!
//! Provider credentials come from environment variables. A channel is only
//! enabled when every variable it needs is present; otherwise it is left out
//! and the dispatcher reports it as not sent.
//!
//! ## Environment Variables
//!
//! - `BUSINESS_NAME`: Name used in message text (default: "Salon")
//! - `EMAIL_API_URL`, `EMAIL_API_KEY`, `EMAIL_FROM`: transactional email API
//! - `PUSH_API_URL`, `PUSH_API_TOKEN`: owner push webhook
//! - `WHATSAPP_API_URL` (default: "https://graph.facebook.com/v19.0"),
//!   `WHATSAPP_TOKEN`, `WHATSAPP_PHONE_NUMBER_ID`, `OWNER_WHATSAPP_NUMBER`:
//!   WhatsApp Cloud API

use eyre::{eyre, Result};
use reqwest::Url;
use std::env;

pub const DEFAULT_WHATSAPP_API_URL: &str = "https://graph.facebook.com/v19.0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailSettings {
    pub api_url: String,
    pub api_key: String,
    /// Sender address, e.g. `"Salon <bookings@example.com>"`
    pub from: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushSettings {
    pub api_url: String,
    pub api_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhatsAppSettings {
    pub api_url: String,
    pub token: String,
    pub phone_number_id: String,
    /// Owner's number in international format without `+`
    pub owner_number: String,
}

/// Configuration for all notification channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyConfig {
    pub business_name: String,
    pub email: Option<EmailSettings>,
    pub push: Option<PushSettings>,
    pub whatsapp: Option<WhatsAppSettings>,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            business_name: "Salon".to_string(),
            email: None,
            push: None,
            whatsapp: None,
        }
    }
}

impl NotifyConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Blank values count as missing.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured API URL is not a valid URL.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let business_name = var("BUSINESS_NAME").unwrap_or_else(|| "Salon".to_string());

        let email = match (var("EMAIL_API_URL"), var("EMAIL_API_KEY"), var("EMAIL_FROM")) {
            (Some(api_url), Some(api_key), Some(from)) => Some(EmailSettings {
                api_url: checked_url("EMAIL_API_URL", api_url)?,
                api_key,
                from,
            }),
            _ => None,
        };

        let push = match (var("PUSH_API_URL"), var("PUSH_API_TOKEN")) {
            (Some(api_url), Some(api_token)) => Some(PushSettings {
                api_url: checked_url("PUSH_API_URL", api_url)?,
                api_token,
            }),
            _ => None,
        };

        let whatsapp = match (
            var("WHATSAPP_TOKEN"),
            var("WHATSAPP_PHONE_NUMBER_ID"),
            var("OWNER_WHATSAPP_NUMBER"),
        ) {
            (Some(token), Some(phone_number_id), Some(owner_number)) => {
                let api_url = var("WHATSAPP_API_URL")
                    .unwrap_or_else(|| DEFAULT_WHATSAPP_API_URL.to_string());
                Some(WhatsAppSettings {
                    api_url: checked_url("WHATSAPP_API_URL", api_url)?,
                    token,
                    phone_number_id,
                    owner_number: owner_number.trim_start_matches('+').to_string(),
                })
            }
            _ => None,
        };

        Ok(Self {
            business_name,
            email,
            push,
            whatsapp,
        })
    }
}

fn checked_url(key: &str, value: String) -> Result<String> {
    Url::parse(&value).map_err(|e| eyre!("{} is not a valid URL ({}): {}", key, value, e))?;
    Ok(value.trim_end_matches('/').to_string())
}
