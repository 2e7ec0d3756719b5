use chrono::{DateTime, Utc};
use eyre::{eyre, Result};
use salonbook_core::{
    models::{
        appointment::{Appointment, AppointmentStatus, ServiceDetails, ServiceSelection},
        booking::{BookingDetails, BookingSlot},
    },
};
use sqlx::{types::Json, FromRow};
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub date: String,
    pub time: String,
    pub services: Json<Vec<ServiceSelection>>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub nail_shape: Option<String>,
    pub nail_design: Option<String>,
    pub tattoo_location: Option<String>,
    pub tattoo_size: Option<String>,
    pub reference_image: Option<String>,
    pub special_requests: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<DbAppointment> for Appointment {
    type Error = eyre::Report;

    fn try_from(row: DbAppointment) -> Result<Self> {
        let status = row
            .status
            .parse::<AppointmentStatus>()
            .map_err(|e| eyre!("appointment {}: {}", row.id, e))?;

        Ok(Appointment {
            id: row.id,
            date: row.date,
            time: row.time,
            services: row.services.0,
            customer_name: row.customer_name,
            customer_email: row.customer_email,
            customer_phone: row.customer_phone,
            details: ServiceDetails {
                nail_shape: row.nail_shape,
                nail_design: row.nail_design,
                tattoo_location: row.tattoo_location,
                tattoo_size: row.tattoo_size,
                reference_image: row.reference_image,
                special_requests: row.special_requests,
            },
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Values for a new `appointments` row, already in storage format.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub date: String,
    pub time: String,
    pub services: Vec<ServiceSelection>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub details: ServiceDetails,
    pub status: AppointmentStatus,
}

impl NewAppointment {
    /// Builds a confirmed appointment from a validated booking.
    pub fn from_booking(booking: &BookingDetails, slot: BookingSlot) -> Self {
        Self {
            date: slot.date.to_storage_string(),
            time: slot.time.to_storage_string(),
            services: booking.services.clone(),
            customer_name: booking.customer_name.trim().to_string(),
            customer_email: booking.customer_email.trim().to_string(),
            customer_phone: booking.customer_phone.trim().to_string(),
            details: booking.details.clone(),
            status: AppointmentStatus::Confirmed,
        }
    }
}

/// Result of inserting an appointment.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    Created(Appointment),
    /// Another active appointment already holds the same date and time.
    SlotTaken,
}

/// Result of a cancellation attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum CancelOutcome {
    /// This call moved the appointment to `cancelled`.
    Cancelled(Appointment),
    /// The appointment was cancelled before this call; nothing changed.
    AlreadyCancelled(Appointment),
    NotFound,
}

impl CancelOutcome {
    /// Classifies a cancel whose conditional update matched no row, given
    /// the row as it is now.
    ///
    /// A row that could still move to `cancelled` means the update should
    /// have matched, so it is reported as an error rather than a no-op.
    pub fn unchanged(current: Option<Appointment>) -> Result<Self> {
        match current {
            None => Ok(CancelOutcome::NotFound),
            Some(appointment)
                if appointment
                    .status
                    .can_transition_to(AppointmentStatus::Cancelled) =>
            {
                Err(eyre!(
                    "appointment {} is {} but was not cancelled",
                    appointment.id,
                    appointment.status
                ))
            }
            Some(appointment) => Ok(CancelOutcome::AlreadyCancelled(appointment)),
        }
    }
}
