use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{appointment::AppointmentStatus, inventory::needs_restock, user::Role};

pub const STATUS_NEEDS_RESTOCK: &str = "Needs Restock";
pub const STATUS_OK: &str = "OK";

/// Accounts created per month and role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRegistrationStat {
    /// First day of the month
    pub month: NaiveDate,
    pub role: Role,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryStatusStat {
    pub medicine_name: String,
    pub quantity: i32,
    pub threshold: i32,
    pub status: String,
}

impl InventoryStatusStat {
    pub fn new(medicine_name: String, quantity: i32, threshold: i32) -> Self {
        let status = if needs_restock(quantity, threshold) {
            STATUS_NEEDS_RESTOCK
        } else {
            STATUS_OK
        };

        Self {
            medicine_name,
            quantity,
            threshold,
            status: status.to_string(),
        }
    }
}

/// Prescriptions per medication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrescriptionStat {
    pub medication: String,
    pub count: i64,
    /// Distinct patients prescribed this medication
    pub patients: i64,
    pub active: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentTrendStat {
    pub month: NaiveDate,
    pub status_group: String,
    pub count: i64,
}

impl AppointmentTrendStat {
    pub fn new(month: NaiveDate, status: AppointmentStatus, count: i64) -> Self {
        Self {
            month,
            status_group: status.report_group().to_string(),
            count,
        }
    }
}
