//! # Appointment Handlers
//!
//! Listing a day's appointments, creating an appointment and looking one up.
//!
//! Dates arrive as `DD-MM-YYYY` or in the `MM/DD/YYYY` storage format and are
//! parsed once, here, into a [`BookingDate`]. The store is always queried with
//! the storage form.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Local;
use serde::Deserialize;
use std::sync::Arc;
use salonbook_core::{
    errors::BookingError,
    models::{
        appointment::{Appointment, CreateAppointmentResponse, DailyAppointment},
        booking::BookingDetails,
    },
    schedule::BookingDate,
};
use salonbook_db::models::{CreateOutcome, NewAppointment};
use tracing::info;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

/// Query parameters for the day listing
#[derive(Debug, Deserialize)]
pub struct DailyQuery {
    /// `DD-MM-YYYY` or `MM/DD/YYYY`; today when absent
    pub date: Option<String>,
}

/// Lists every appointment stored on one date
///
/// # Endpoint
///
/// ```text
/// GET /appointments/today?date=15-03-2025
/// ```
///
/// Rows come back in store order, formatted for display.
///
/// # Errors
///
/// * `BookingError::Validation` - The date is in neither accepted format
/// * `BookingError::Database` - The store could not be queried
#[axum::debug_handler]
pub async fn list_daily_appointments(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<DailyQuery>,
) -> Result<Json<Vec<DailyAppointment>>, AppError> {
    let date = match query.date.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => BookingDate::parse(raw).map_err(BookingError::from)?,
        _ => BookingDate::new(Local::now().date_naive()),
    };

    let appointments = state.store.find_by_date(date).await?;

    let rows = appointments.iter().map(DailyAppointment::from).collect();

    Ok(Json(rows))
}

/// Creates a confirmed appointment
///
/// The request body is the booking form. Date and time are normalised to the
/// storage format before insertion. Creation does not send notifications.
///
/// # Errors
///
/// * `BookingError::Validation` - Missing customer fields, no services, bad date/time
/// * `BookingError::Conflict` - An active appointment already holds the slot
/// * `BookingError::Database` - The store could not be written
#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<BookingDetails>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateAppointmentResponse>), AppError> {
    let Json(booking) = payload?;
    let slot = booking.validate()?;

    let new_appointment = NewAppointment::from_booking(&booking, slot);

    match state.store.create(new_appointment).await? {
        CreateOutcome::Created(appointment) => {
            info!(
                "Appointment {} booked for {} {}",
                appointment.id, appointment.date, appointment.time
            );
            let response = CreateAppointmentResponse {
                id: appointment.id,
                date: appointment.date,
                time: appointment.time,
                status: appointment.status,
                created_at: appointment.created_at,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        CreateOutcome::SlotTaken => Err(AppError(BookingError::Conflict(format!(
            "{} at {} is already booked",
            slot.date,
            slot.time.to_12h_string()
        )))),
    }
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<Appointment>, AppError> {
    let id = Uuid::parse_str(id.trim())
        .map_err(|_| BookingError::Validation(format!("'{}' is not a valid appointment id", id)))?;

    let appointment = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Appointment with ID {} not found", id)))?;

    Ok(Json(appointment))
}
