use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/reports/users", get(handlers::reports::user_registration_report))
        .route("/api/reports/inventory", get(handlers::reports::inventory_report))
        .route("/api/reports/prescriptions", get(handlers::reports::prescription_report))
        .route("/api/reports/appointments", get(handlers::reports::appointment_report))
}
