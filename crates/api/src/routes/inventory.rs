use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/inventory",
            get(handlers::inventory::list_inventory_items)
                .post(handlers::inventory::create_inventory_item),
        )
        .route(
            "/api/inventory/:id",
            get(handlers::inventory::get_inventory_item)
                .put(handlers::inventory::update_inventory_item)
                .delete(handlers::inventory::delete_inventory_item),
        )
}
