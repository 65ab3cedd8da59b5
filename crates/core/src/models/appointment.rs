use std::{fmt, str::FromStr};

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::availability::{parse_date, parse_time_of_day};
use crate::errors::{ClinicError, ClinicResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 3] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    /// Label used by the appointment trend report
    pub fn report_group(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "Scheduled",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = ClinicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppointmentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ClinicError::Validation(format!("Unknown appointment status: {}", s)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub patient_name: String,
    pub doctor_id: Option<Uuid>,
    /// Email of the assigned doctor
    pub doctor_name: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub notes: Option<String>,
    pub status: AppointmentStatus,
}

/// Appointment creation payload
///
/// Date and time arrive as strings so that missing or malformed values are
/// reported as validation errors rather than body rejections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub patient_id: Option<Uuid>,
    pub doctor_id: Option<Uuid>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub notes: Option<String>,
    pub status: Option<AppointmentStatus>,
}

/// A creation request with every required field present and parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    pub patient_id: Uuid,
    pub doctor_id: Option<Uuid>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub notes: Option<String>,
    pub status: AppointmentStatus,
}

impl CreateAppointmentRequest {
    pub fn validate(self) -> ClinicResult<NewAppointment> {
        let (Some(patient_id), Some(date), Some(time)) = (self.patient_id, self.date, self.time)
        else {
            return Err(ClinicError::Validation(
                "Missing required fields: patient_id, date and time are required".to_string(),
            ));
        };

        Ok(NewAppointment {
            patient_id,
            doctor_id: self.doctor_id,
            date: parse_date(&date)?,
            time: parse_time_of_day(&time)?,
            notes: self.notes,
            status: self.status.unwrap_or_default(),
        })
    }
}

/// A present field, even `null`, becomes `Some`, so absent and cleared differ
fn deserialize_double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let inner = Option::<T>::deserialize(deserializer)?;
    Ok(Some(inner))
}

/// Partial appointment update
///
/// `doctor_id` and `notes` are nullable: omitting them keeps the stored
/// value, an explicit `null` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub patient_id: Option<Uuid>,
    #[serde(
        default,
        deserialize_with = "deserialize_double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub doctor_id: Option<Option<Uuid>>,
    pub date: Option<String>,
    pub time: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<Option<String>>,
    pub status: Option<AppointmentStatus>,
}

impl UpdateAppointmentRequest {
    pub fn parsed_date(&self) -> ClinicResult<Option<NaiveDate>> {
        self.date.as_deref().map(parse_date).transpose()
    }

    pub fn parsed_time(&self) -> ClinicResult<Option<NaiveTime>> {
        self.time.as_deref().map(parse_time_of_day).transpose()
    }

    /// Overlays the supplied fields on `current`; absent fields are kept and
    /// nulled nullable fields are cleared
    pub fn apply_to(self, current: NewAppointment) -> ClinicResult<NewAppointment> {
        let date = self.parsed_date()?;
        let time = self.parsed_time()?;

        Ok(NewAppointment {
            patient_id: self.patient_id.unwrap_or(current.patient_id),
            doctor_id: self.doctor_id.unwrap_or(current.doctor_id),
            date: date.unwrap_or(current.date),
            time: time.unwrap_or(current.time),
            notes: self.notes.unwrap_or(current.notes),
            status: self.status.unwrap_or(current.status),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentQuery {
    pub date: Option<String>,
    pub patient_id: Option<Uuid>,
    pub doctor_id: Option<Uuid>,
}

impl AppointmentQuery {
    pub fn parsed_date(&self) -> ClinicResult<Option<NaiveDate>> {
        self.date.as_deref().map(parse_date).transpose()
    }
}
