use axum::Json;
use clinicare_core::models::{inventory::InventoryItem, report::InventoryStatusStat};
use mockall::predicate;
use pretty_assertions::assert_eq;

use crate::test_utils::{TestContext, db_inventory_item};
use clinicare_api::middleware::error_handling::AppError;

async fn list_inventory_wrapper(
    ctx: &TestContext,
    restock_only: bool,
) -> Result<Json<Vec<InventoryItem>>, AppError> {
    let items = ctx.inventory_repo.list_inventory_items(restock_only).await?;

    Ok(Json(items.into_iter().map(InventoryItem::from).collect()))
}

#[tokio::test]
async fn test_inventory_items_carry_restock_flag() {
    let mut ctx = TestContext::new();

    ctx.inventory_repo
        .expect_list_inventory_items()
        .with(predicate::eq(false))
        .times(1)
        .returning(|_| {
            Ok(vec![
                db_inventory_item("Paracetamol", 3, 10),
                db_inventory_item("Insulin", 10, 10),
                db_inventory_item("Saline", 250, 50),
            ])
        });

    let Json(items) = list_inventory_wrapper(&ctx, false).await.unwrap();

    let flags: Vec<(&str, bool)> = items
        .iter()
        .map(|item| (item.medicine_name.as_str(), item.needs_restock))
        .collect();
    assert_eq!(
        flags,
        vec![("Paracetamol", true), ("Insulin", true), ("Saline", false)]
    );
}

#[tokio::test]
async fn test_inventory_report_status() {
    let stats: Vec<InventoryStatusStat> = [
        db_inventory_item("Paracetamol", 3, 10),
        db_inventory_item("Saline", 250, 50),
    ]
    .into_iter()
    .map(InventoryStatusStat::from)
    .collect();

    assert_eq!(stats[0].status, "Needs Restock");
    assert_eq!(stats[1].status, "OK");
}

#[tokio::test]
async fn test_inventory_store_failure_is_server_error() {
    let mut ctx = TestContext::new();

    ctx.inventory_repo
        .expect_list_inventory_items()
        .returning(|_| Err(eyre::eyre!("pool timed out")));

    let err = list_inventory_wrapper(&ctx, true).await.unwrap_err();

    assert_eq!(err.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
}
