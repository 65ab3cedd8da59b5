use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/prescriptions",
            get(handlers::prescriptions::list_prescriptions)
                .post(handlers::prescriptions::create_prescription),
        )
        .route(
            "/api/prescriptions/:id",
            get(handlers::prescriptions::get_prescription)
                .put(handlers::prescriptions::update_prescription)
                .delete(handlers::prescriptions::delete_prescription),
        )
}
