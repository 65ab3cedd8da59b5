use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/api/doctors/:doctor_id/availability",
        get(handlers::availability::doctor_availability),
    )
}
