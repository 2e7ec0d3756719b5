use async_trait::async_trait;
use mockall::mock;
use salonbook_core::{models::appointment::Appointment, schedule::BookingDate};
use uuid::Uuid;

use crate::{
    models::{CancelOutcome, CreateOutcome, NewAppointment},
    store::AppointmentStore,
};

// Mock store for handler tests
mock! {
    pub AppointmentRepo {}

    #[async_trait]
    impl AppointmentStore for AppointmentRepo {
        async fn create(&self, appointment: NewAppointment) -> eyre::Result<CreateOutcome>;

        async fn find_by_id(&self, id: Uuid) -> eyre::Result<Option<Appointment>>;

        async fn find_by_date(&self, date: BookingDate) -> eyre::Result<Vec<Appointment>>;

        async fn cancel(&self, id: Uuid) -> eyre::Result<CancelOutcome>;
    }
}
