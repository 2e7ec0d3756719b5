//! # Appointment store
//!
//! Handlers reach the database through [`AppointmentStore`] so they can be
//! exercised against [`crate::mock::repositories::MockAppointmentRepo`] in
//! tests. [`PgAppointmentStore`] is the production implementation and simply
//! delegates to the repository functions.

use async_trait::async_trait;
use eyre::Result;
use salonbook_core::{models::appointment::Appointment, schedule::BookingDate};
use uuid::Uuid;

use crate::{
    models::{CancelOutcome, CreateOutcome, NewAppointment},
    repositories::appointment,
    DbPool,
};

#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn create(&self, appointment: NewAppointment) -> Result<CreateOutcome>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Appointment>>;

    async fn find_by_date(&self, date: BookingDate) -> Result<Vec<Appointment>>;

    async fn cancel(&self, id: Uuid) -> Result<CancelOutcome>;
}

/// [`AppointmentStore`] backed by the Postgres `appointments` table.
#[derive(Debug, Clone)]
pub struct PgAppointmentStore {
    pool: DbPool,
}

impl PgAppointmentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppointmentStore for PgAppointmentStore {
    async fn create(&self, new_appointment: NewAppointment) -> Result<CreateOutcome> {
        appointment::create_appointment(&self.pool, &new_appointment).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Appointment>> {
        appointment::get_appointment_by_id(&self.pool, id).await
    }

    async fn find_by_date(&self, date: BookingDate) -> Result<Vec<Appointment>> {
        appointment::get_appointments_by_date(&self.pool, &date.to_storage_string()).await
    }

    async fn cancel(&self, id: Uuid) -> Result<CancelOutcome> {
        appointment::cancel_appointment(&self.pool, id).await
    }
}
