use crate::models::{CancelOutcome, CreateOutcome, DbAppointment, NewAppointment};
use chrono::Utc;
use eyre::Result;
use salonbook_core::models::appointment::{Appointment, AppointmentStatus};
use sqlx::{types::Json, Pool, Postgres};
use uuid::Uuid;

pub async fn create_appointment(
    pool: &Pool<Postgres>,
    appointment: &NewAppointment,
) -> Result<CreateOutcome> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating appointment: id={}, date={}, time={}, services={}",
        id, appointment.date, appointment.time, appointment.services.len()
    );

    // The partial unique index only covers active rows, so a cancelled
    // appointment never blocks its slot.
    let row = sqlx::query_as::<_, DbAppointment>(
        r#"
        INSERT INTO appointments (
            id, date, time, services, customer_name, customer_email, customer_phone,
            nail_shape, nail_design, tattoo_location, tattoo_size, reference_image,
            special_requests, status, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $15)
        ON CONFLICT (date, time) WHERE status <> 'cancelled' DO NOTHING
        RETURNING id, date, time, services, customer_name, customer_email, customer_phone,
                  nail_shape, nail_design, tattoo_location, tattoo_size, reference_image,
                  special_requests, status, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(&appointment.date)
    .bind(&appointment.time)
    .bind(Json(appointment.services.clone()))
    .bind(&appointment.customer_name)
    .bind(&appointment.customer_email)
    .bind(&appointment.customer_phone)
    .bind(&appointment.details.nail_shape)
    .bind(&appointment.details.nail_design)
    .bind(&appointment.details.tattoo_location)
    .bind(&appointment.details.tattoo_size)
    .bind(&appointment.details.reference_image)
    .bind(&appointment.details.special_requests)
    .bind(appointment.status.as_str())
    .bind(now)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => {
            tracing::debug!("Appointment created successfully: id={}", id);
            Ok(CreateOutcome::Created(Appointment::try_from(row)?))
        }
        None => {
            tracing::debug!(
                "Slot already taken: date={}, time={}",
                appointment.date, appointment.time
            );
            Ok(CreateOutcome::SlotTaken)
        }
    }
}

pub async fn get_appointment_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<Appointment>> {
    tracing::debug!("Getting appointment by id: {}", id);

    let row = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, date, time, services, customer_name, customer_email, customer_phone,
               nail_shape, nail_design, tattoo_location, tattoo_size, reference_image,
               special_requests, status, created_at, updated_at
        FROM appointments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(Appointment::try_from).transpose()
}

/// Returns every appointment stored under `date` (storage format), in store order.
pub async fn get_appointments_by_date(pool: &Pool<Postgres>, date: &str) -> Result<Vec<Appointment>> {
    tracing::debug!("Getting appointments for date: {}", date);

    let rows = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, date, time, services, customer_name, customer_email, customer_phone,
               nail_shape, nail_design, tattoo_location, tattoo_size, reference_image,
               special_requests, status, created_at, updated_at
        FROM appointments
        WHERE date = $1
        "#,
    )
    .bind(date)
    .fetch_all(pool)
    .await?;

    tracing::debug!("Found {} appointments for {}", rows.len(), date);

    rows.into_iter().map(Appointment::try_from).collect()
}

/// Moves an active appointment to `cancelled`.
///
/// The update only matches rows that are not cancelled yet, so when two
/// requests race on the same id exactly one of them gets
/// [`CancelOutcome::Cancelled`].
pub async fn cancel_appointment(pool: &Pool<Postgres>, id: Uuid) -> Result<CancelOutcome> {
    let now = Utc::now();

    let row = sqlx::query_as::<_, DbAppointment>(
        r#"
        UPDATE appointments
        SET status = $2, updated_at = $3
        WHERE id = $1 AND status <> $2
        RETURNING id, date, time, services, customer_name, customer_email, customer_phone,
                  nail_shape, nail_design, tattoo_location, tattoo_size, reference_image,
                  special_requests, status, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(AppointmentStatus::Cancelled.as_str())
    .bind(now)
    .fetch_optional(pool)
    .await?;

    if let Some(row) = row {
        tracing::debug!("Appointment cancelled: id={}", id);
        return Ok(CancelOutcome::Cancelled(Appointment::try_from(row)?));
    }

    let outcome = CancelOutcome::unchanged(get_appointment_by_id(pool, id).await?)?;
    tracing::debug!("Appointment not cancelled: id={}, outcome={:?}", id, outcome);

    Ok(outcome)
}
