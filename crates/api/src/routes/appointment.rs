use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/appointments/today",
            get(handlers::appointment::list_daily_appointments),
        )
        .route("/appointments", post(handlers::appointment::create_appointment))
        .route("/appointments/:id", get(handlers::appointment::get_appointment))
}
