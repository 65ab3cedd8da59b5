use crate::models::DbInventoryItem;
use clinicare_core::models::inventory::{CreateInventoryItemRequest, UpdateInventoryItemRequest};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_inventory_item(
    pool: &Pool<Postgres>,
    item: &CreateInventoryItemRequest,
) -> Result<DbInventoryItem> {
    let id = Uuid::new_v4();

    let created = sqlx::query_as::<_, DbInventoryItem>(
        r#"
        INSERT INTO inventory_items (id, medicine_name, quantity, expiry_date, threshold)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, medicine_name, quantity, expiry_date, threshold
        "#,
    )
    .bind(id)
    .bind(&item.medicine_name)
    .bind(item.quantity)
    .bind(item.expiry_date)
    .bind(item.threshold)
    .fetch_one(pool)
    .await?;

    Ok(created)
}

pub async fn get_inventory_item_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbInventoryItem>> {
    let item = sqlx::query_as::<_, DbInventoryItem>(
        r#"
        SELECT id, medicine_name, quantity, expiry_date, threshold
        FROM inventory_items
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(item)
}

/// Lists stock by expiry date; `restock_only` keeps items at or below threshold
pub async fn list_inventory_items(
    pool: &Pool<Postgres>,
    restock_only: bool,
) -> Result<Vec<DbInventoryItem>> {
    let items = sqlx::query_as::<_, DbInventoryItem>(
        r#"
        SELECT id, medicine_name, quantity, expiry_date, threshold
        FROM inventory_items
        WHERE ($1 = FALSE OR quantity <= threshold)
        ORDER BY expiry_date ASC
        "#,
    )
    .bind(restock_only)
    .fetch_all(pool)
    .await?;

    Ok(items)
}

pub async fn update_inventory_item(
    pool: &Pool<Postgres>,
    id: Uuid,
    changes: &UpdateInventoryItemRequest,
) -> Result<Option<DbInventoryItem>> {
    let item = sqlx::query_as::<_, DbInventoryItem>(
        r#"
        UPDATE inventory_items
        SET medicine_name = COALESCE($2, medicine_name),
            quantity = COALESCE($3, quantity),
            expiry_date = COALESCE($4, expiry_date),
            threshold = COALESCE($5, threshold)
        WHERE id = $1
        RETURNING id, medicine_name, quantity, expiry_date, threshold
        "#,
    )
    .bind(id)
    .bind(changes.medicine_name.as_deref())
    .bind(changes.quantity)
    .bind(changes.expiry_date)
    .bind(changes.threshold)
    .fetch_optional(pool)
    .await?;

    Ok(item)
}

pub async fn delete_inventory_item(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM inventory_items WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
