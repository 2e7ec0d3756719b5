use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

use crate::formatting::format_time_12h;

/// Lifecycle flag of an appointment. `Cancelled` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Confirmed,
    Pending,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, AppointmentStatus::Cancelled)
    }

    /// Only active appointments may move, and only to `Cancelled`.
    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        self.is_active() && next == AppointmentStatus::Cancelled
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "pending" => Ok(AppointmentStatus::Pending),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            other => Err(format!("unknown appointment status '{}'", other)),
        }
    }
}

/// One service picked by the customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSelection {
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
}

/// Optional fields that only apply to some services (nails, tattoos).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nail_shape: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nail_design: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tattoo_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tattoo_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    /// `MM/DD/YYYY`
    pub date: String,
    /// `HH:MM`, 24-hour
    pub time: String,
    pub services: Vec<ServiceSelection>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    #[serde(flatten)]
    pub details: ServiceDetails,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    pub fn primary_service_name(&self) -> &str {
        self.services.first().map(|s| s.name.as_str()).unwrap_or("")
    }
}

/// Sum of the listed service prices.
pub fn total_price(services: &[ServiceSelection]) -> f64 {
    services.iter().map(|s| s.price).sum()
}

/// Row of the day listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyAppointment {
    pub time: String,
    pub name: String,
    pub phone: String,
    pub service: String,
    pub date: String,
}

impl From<&Appointment> for DailyAppointment {
    fn from(appointment: &Appointment) -> Self {
        Self {
            time: format_time_12h(&appointment.time),
            name: appointment.customer_name.clone(),
            phone: appointment.customer_phone.clone(),
            service: appointment.primary_service_name().to_string(),
            date: appointment.date.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentResponse {
    pub id: Uuid,
    pub date: String,
    pub time: String,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelAppointmentRequest {
    #[serde(default)]
    pub appointment_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelAppointmentResponse {
    pub success: bool,
    pub redirect_url: String,
}
