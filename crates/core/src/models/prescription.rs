use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{ClinicError, ClinicResult};
use crate::models::patient::check_len;

const MAX_MEDICATION_LEN: usize = 255;
const MAX_DOSAGE_LEN: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prescription {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub patient_name: String,
    pub doctor_id: Uuid,
    pub doctor_name: String,
    pub medication: String,
    pub dosage: String,
    pub instructions: String,
    pub date_prescribed: DateTime<Utc>,
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePrescriptionRequest {
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub medication: String,
    pub dosage: String,
    pub instructions: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl CreatePrescriptionRequest {
    pub fn validate(&self) -> ClinicResult<()> {
        validate_fields(Some(&self.medication), Some(&self.dosage))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePrescriptionRequest {
    pub patient_id: Option<Uuid>,
    pub doctor_id: Option<Uuid>,
    pub medication: Option<String>,
    pub dosage: Option<String>,
    pub instructions: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdatePrescriptionRequest {
    pub fn validate(&self) -> ClinicResult<()> {
        validate_fields(self.medication.as_deref(), self.dosage.as_deref())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrescriptionQuery {
    pub patient_id: Option<Uuid>,
    pub doctor_id: Option<Uuid>,
    pub active: Option<String>,
}

impl PrescriptionQuery {
    pub fn active_only(&self) -> bool {
        self.active
            .as_deref()
            .is_some_and(|value| value.eq_ignore_ascii_case("true"))
    }
}

fn validate_fields(medication: Option<&str>, dosage: Option<&str>) -> ClinicResult<()> {
    if let Some(medication) = medication {
        if medication.trim().is_empty() {
            return Err(ClinicError::Validation("medication cannot be empty".to_string()));
        }
        check_len("medication", medication, MAX_MEDICATION_LEN)?;
    }

    if let Some(dosage) = dosage {
        if dosage.trim().is_empty() {
            return Err(ClinicError::Validation("dosage cannot be empty".to_string()));
        }
        check_len("dosage", dosage, MAX_DOSAGE_LEN)?;
    }

    Ok(())
}
