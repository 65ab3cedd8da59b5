use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use clinicare_core::{
    errors::ClinicError,
    models::inventory::{
        CreateInventoryItemRequest, InventoryItem, InventoryQuery, UpdateInventoryItemRequest,
    },
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    ApiState,
    extract::{Path, Query},
    middleware::error_handling::AppError,
};

fn not_found(id: Uuid) -> ClinicError {
    ClinicError::NotFound(format!("Inventory item with ID {} not found", id))
}

#[axum::debug_handler]
pub async fn list_inventory_items(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<InventoryQuery>,
) -> Result<Json<Vec<InventoryItem>>, AppError> {
    let items = clinicare_db::repositories::inventory::list_inventory_items(
        &state.db_pool,
        query.restock_only(),
    )
    .await
    .map_err(ClinicError::Database)?;

    Ok(Json(items.into_iter().map(InventoryItem::from).collect()))
}

#[axum::debug_handler]
pub async fn get_inventory_item(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<InventoryItem>, AppError> {
    let item = clinicare_db::repositories::inventory::get_inventory_item_by_id(&state.db_pool, id)
        .await
        .map_err(ClinicError::Database)?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(item.into()))
}

#[axum::debug_handler]
pub async fn create_inventory_item(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateInventoryItemRequest>,
) -> Result<(StatusCode, Json<InventoryItem>), AppError> {
    payload.validate()?;

    let item = clinicare_db::repositories::inventory::create_inventory_item(&state.db_pool, &payload)
        .await
        .map_err(ClinicError::Database)?;

    Ok((StatusCode::CREATED, Json(item.into())))
}

#[axum::debug_handler]
pub async fn update_inventory_item(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateInventoryItemRequest>,
) -> Result<Json<InventoryItem>, AppError> {
    payload.validate()?;

    let item = clinicare_db::repositories::inventory::update_inventory_item(
        &state.db_pool,
        id,
        &payload,
    )
    .await
    .map_err(ClinicError::Database)?
    .ok_or_else(|| not_found(id))?;

    let item = InventoryItem::from(item);
    if item.needs_restock {
        tracing::warn!(
            "{} is at {} units, at or below its threshold of {}",
            item.medicine_name,
            item.quantity,
            item.threshold
        );
    }

    Ok(Json(item))
}

#[axum::debug_handler]
pub async fn delete_inventory_item(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = clinicare_db::repositories::inventory::delete_inventory_item(&state.db_pool, id)
        .await
        .map_err(ClinicError::Database)?;
    if !deleted {
        return Err(AppError(not_found(id)));
    }

    Ok(StatusCode::NO_CONTENT)
}
