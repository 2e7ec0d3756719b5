use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::{BookingError, BookingResult},
    models::appointment::{ServiceDetails, ServiceSelection},
    schedule::{BookingDate, BookingTime},
};

/// Booking form as submitted by the client. Used both to create an
/// appointment and to trigger the confirmation notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<Uuid>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub services: Vec<ServiceSelection>,
    #[serde(flatten)]
    pub details: ServiceDetails,
}

/// Date and time of a booking after boundary parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingSlot {
    pub date: BookingDate,
    pub time: BookingTime,
}

impl BookingDetails {
    /// Checks the customer fields and the service list, and parses the slot.
    pub fn validate(&self) -> BookingResult<BookingSlot> {
        if self.customer_name.trim().is_empty() {
            return Err(BookingError::Validation("customerName is required".to_string()));
        }
        let email = self.customer_email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(BookingError::Validation(format!(
                "customerEmail '{}' is not a valid email address",
                self.customer_email
            )));
        }
        if self.customer_phone.trim().is_empty() {
            return Err(BookingError::Validation("customerPhone is required".to_string()));
        }
        if self.services.is_empty() {
            return Err(BookingError::Validation("at least one service must be selected".to_string()));
        }
        if let Some(service) = self.services.iter().find(|s| s.name.trim().is_empty()) {
            return Err(BookingError::Validation(format!(
                "service with price {} has no name",
                service.price
            )));
        }

        let date = BookingDate::parse(&self.date)?;
        let time = BookingTime::parse(&self.time)?;

        Ok(BookingSlot { date, time })
    }
}

/// Per-channel outcome of a notification fan-out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryReport {
    pub email_sent: bool,
    pub notification_sent: bool,
    pub whatsapp_sent: bool,
}

impl DeliveryReport {
    pub fn all_sent(&self) -> bool {
        self.email_sent && self.notification_sent && self.whatsapp_sent
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmBookingResponse {
    pub success: bool,
    #[serde(flatten)]
    pub delivery: DeliveryReport,
}
