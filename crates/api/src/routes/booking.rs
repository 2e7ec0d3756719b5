use axum::{routing::post, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/booking/cancel", post(handlers::booking::cancel_booking))
        .route("/booking/confirm", post(handlers::booking::confirm_booking))
}
