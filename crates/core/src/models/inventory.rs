use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{ClinicError, ClinicResult};
use crate::models::patient::check_len;

pub const DEFAULT_RESTOCK_THRESHOLD: i32 = 10;

const MAX_MEDICINE_NAME_LEN: usize = 100;

/// Stock at or below the threshold needs restocking
pub fn needs_restock(quantity: i32, threshold: i32) -> bool {
    quantity <= threshold
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: Uuid,
    pub medicine_name: String,
    pub quantity: i32,
    pub expiry_date: NaiveDate,
    pub threshold: i32,
    pub needs_restock: bool,
}

fn default_threshold() -> i32 {
    DEFAULT_RESTOCK_THRESHOLD
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInventoryItemRequest {
    pub medicine_name: String,
    pub quantity: i32,
    pub expiry_date: NaiveDate,
    #[serde(default = "default_threshold")]
    pub threshold: i32,
}

impl CreateInventoryItemRequest {
    pub fn validate(&self) -> ClinicResult<()> {
        validate_fields(
            Some(&self.medicine_name),
            Some(self.quantity),
            Some(self.threshold),
        )
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateInventoryItemRequest {
    pub medicine_name: Option<String>,
    pub quantity: Option<i32>,
    pub expiry_date: Option<NaiveDate>,
    pub threshold: Option<i32>,
}

impl UpdateInventoryItemRequest {
    pub fn validate(&self) -> ClinicResult<()> {
        validate_fields(self.medicine_name.as_deref(), self.quantity, self.threshold)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryQuery {
    pub needs_restock: Option<String>,
}

impl InventoryQuery {
    /// Only `true` (any case) narrows the listing
    pub fn restock_only(&self) -> bool {
        self.needs_restock
            .as_deref()
            .is_some_and(|value| value.eq_ignore_ascii_case("true"))
    }
}

fn validate_fields(
    medicine_name: Option<&str>,
    quantity: Option<i32>,
    threshold: Option<i32>,
) -> ClinicResult<()> {
    if let Some(name) = medicine_name {
        if name.trim().is_empty() {
            return Err(ClinicError::Validation("medicine_name cannot be empty".to_string()));
        }
        check_len("medicine_name", name, MAX_MEDICINE_NAME_LEN)?;
    }

    for (field, value) in [("quantity", quantity), ("threshold", threshold)] {
        if let Some(value) = value {
            if value < 0 {
                return Err(ClinicError::Validation(format!(
                    "{} must not be negative (got {})",
                    field, value
                )));
            }
        }
    }

    Ok(())
}
