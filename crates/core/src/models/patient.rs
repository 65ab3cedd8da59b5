use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{ClinicError, ClinicResult};

pub const DEFAULT_PATIENT_NAME: &str = "unknown";

const MAX_NAME_LEN: usize = 255;
const MAX_CONTACT_LEN: usize = 20;
const MAX_INSURANCE_PROVIDER_LEN: usize = 100;
const MAX_INSURANCE_ID_LEN: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ClinicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            other => Err(ClinicError::Validation(format!("Unknown gender: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BloodType {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodType {
    pub const ALL: [BloodType; 8] = [
        BloodType::APositive,
        BloodType::ANegative,
        BloodType::BPositive,
        BloodType::BNegative,
        BloodType::AbPositive,
        BloodType::AbNegative,
        BloodType::OPositive,
        BloodType::ONegative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BloodType::APositive => "A+",
            BloodType::ANegative => "A-",
            BloodType::BPositive => "B+",
            BloodType::BNegative => "B-",
            BloodType::AbPositive => "AB+",
            BloodType::AbNegative => "AB-",
            BloodType::OPositive => "O+",
            BloodType::ONegative => "O-",
        }
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BloodType {
    type Err = ClinicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BloodType::ALL
            .into_iter()
            .find(|blood_type| blood_type.as_str() == s)
            .ok_or_else(|| ClinicError::Validation(format!("Unknown blood type: {}", s)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub contact: Option<String>,
    pub medical_history: Option<String>,
    pub blood_type: Option<BloodType>,
    pub allergies: String,
    pub chronic_conditions: String,
    pub last_physical: Option<NaiveDate>,
    pub insurance_provider: String,
    pub insurance_id: String,
}

fn default_patient_name() -> String {
    DEFAULT_PATIENT_NAME.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePatientRequest {
    pub user_id: Option<Uuid>,
    #[serde(default = "default_patient_name")]
    pub name: String,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub contact: Option<String>,
    pub medical_history: Option<String>,
    pub blood_type: Option<BloodType>,
    #[serde(default)]
    pub allergies: String,
    #[serde(default)]
    pub chronic_conditions: String,
    pub last_physical: Option<NaiveDate>,
    #[serde(default)]
    pub insurance_provider: String,
    #[serde(default)]
    pub insurance_id: String,
}

impl CreatePatientRequest {
    pub fn validate(&self) -> ClinicResult<()> {
        validate_fields(
            Some(&self.name),
            self.age,
            self.contact.as_deref(),
            Some(&self.insurance_provider),
            Some(&self.insurance_id),
        )
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePatientRequest {
    pub user_id: Option<Uuid>,
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub contact: Option<String>,
    pub medical_history: Option<String>,
    pub blood_type: Option<BloodType>,
    pub allergies: Option<String>,
    pub chronic_conditions: Option<String>,
    pub last_physical: Option<NaiveDate>,
    pub insurance_provider: Option<String>,
    pub insurance_id: Option<String>,
}

impl UpdatePatientRequest {
    pub fn validate(&self) -> ClinicResult<()> {
        validate_fields(
            self.name.as_deref(),
            self.age,
            self.contact.as_deref(),
            self.insurance_provider.as_deref(),
            self.insurance_id.as_deref(),
        )
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientQuery {
    /// Case-insensitive substring of the patient name
    pub name: Option<String>,
}

fn validate_fields(
    name: Option<&str>,
    age: Option<i32>,
    contact: Option<&str>,
    insurance_provider: Option<&str>,
    insurance_id: Option<&str>,
) -> ClinicResult<()> {
    if let Some(name) = name {
        if name.trim().is_empty() {
            return Err(ClinicError::Validation("Patient name cannot be empty".to_string()));
        }
        check_len("name", name, MAX_NAME_LEN)?;
    }

    if let Some(age) = age {
        if age < 0 {
            return Err(ClinicError::Validation(format!(
                "Age must not be negative (got {})",
                age
            )));
        }
    }

    if let Some(contact) = contact {
        check_len("contact", contact, MAX_CONTACT_LEN)?;
    }
    if let Some(provider) = insurance_provider {
        check_len("insurance_provider", provider, MAX_INSURANCE_PROVIDER_LEN)?;
    }
    if let Some(id) = insurance_id {
        check_len("insurance_id", id, MAX_INSURANCE_ID_LEN)?;
    }

    Ok(())
}

pub(crate) fn check_len(field: &str, value: &str, max: usize) -> ClinicResult<()> {
    if value.chars().count() > max {
        return Err(ClinicError::Validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}
