//! # Booking Handlers
//!
//! Cancellation and confirmation notifications.
//!
//! Notifications are best effort. A confirmation reports one flag per
//! channel; a cancellation sends its notice from a background task and the
//! response never waits on it.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;
use salonbook_core::{
    errors::BookingError,
    models::{
        appointment::{CancelAppointmentRequest, CancelAppointmentResponse},
        booking::{BookingDetails, ConfirmBookingResponse},
    },
};
use salonbook_db::models::CancelOutcome;
use salonbook_notify::BookingEvent;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

/// Cancels an appointment
///
/// # Endpoint
///
/// ```text
/// POST /booking/cancel
/// {"appointmentId": "<uuid>"}
/// ```
///
/// The id is checked before the store is touched. Cancelling an appointment
/// that is already cancelled succeeds with the same redirect and sends
/// nothing.
///
/// # Errors
///
/// * `BookingError::Validation` - Missing, blank or malformed id
/// * `BookingError::NotFound` - No appointment with that id
/// * `BookingError::Database` - The store could not be updated
#[axum::debug_handler]
pub async fn cancel_booking(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CancelAppointmentRequest>, JsonRejection>,
) -> Result<Json<CancelAppointmentResponse>, AppError> {
    // No body at all is treated like a body without an id
    let request = match payload {
        Ok(Json(request)) => request,
        Err(JsonRejection::MissingJsonContentType(_)) => CancelAppointmentRequest::default(),
        Err(rejection) => return Err(rejection.into()),
    };

    let raw_id = request
        .appointment_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| BookingError::Validation("appointmentId is required".to_string()))?;

    let id = Uuid::parse_str(raw_id).map_err(|_| {
        BookingError::Validation(format!("'{}' is not a valid appointment id", raw_id))
    })?;

    match state.store.cancel(id).await? {
        CancelOutcome::Cancelled(appointment) => {
            info!("Appointment {} cancelled", id);
            let dispatcher = state.dispatcher.clone();
            tokio::spawn(async move {
                let report = dispatcher.dispatch(BookingEvent::Cancelled(appointment)).await;
                if !report.all_sent() {
                    warn!("Cancellation notice for {} not fully delivered: {:?}", id, report);
                }
            });
        }
        CancelOutcome::AlreadyCancelled(_) => {
            info!("Appointment {} was already cancelled", id);
        }
        CancelOutcome::NotFound => {
            return Err(AppError(BookingError::NotFound(format!(
                "Appointment with ID {} not found",
                id
            ))));
        }
    }

    let response = CancelAppointmentResponse {
        success: true,
        redirect_url: state.config.cancel_redirect_url(id),
    };

    Ok(Json(response))
}

/// Sends the booking confirmation on every channel
///
/// # Endpoint
///
/// ```text
/// POST /booking/confirm
/// ```
///
/// All three channels are attempted. `success` is true for any valid booking;
/// the per-channel flags say which deliveries went through.
///
/// # Errors
///
/// * `BookingError::Validation` - The booking details are incomplete or malformed
#[axum::debug_handler]
pub async fn confirm_booking(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<BookingDetails>, JsonRejection>,
) -> Result<Json<ConfirmBookingResponse>, AppError> {
    let Json(booking) = payload?;
    booking.validate()?;

    let delivery = state.dispatcher.dispatch(BookingEvent::Confirmed(booking)).await;

    Ok(Json(ConfirmBookingResponse {
        success: true,
        delivery,
    }))
}
