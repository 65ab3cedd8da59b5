use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clinicare_core::{
    errors::ClinicError,
    models::{
        appointment::{Appointment, AppointmentStatus, NewAppointment},
        inventory::{InventoryItem, needs_restock},
        patient::Patient,
        prescription::Prescription,
        report::{AppointmentTrendStat, InventoryStatusStat, PrescriptionStat, UserRegistrationStat},
        user::User,
    },
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbPatient {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub contact: Option<String>,
    pub medical_history: Option<String>,
    pub blood_type: Option<String>,
    pub allergies: String,
    pub chronic_conditions: String,
    pub last_physical: Option<NaiveDate>,
    pub insurance_provider: String,
    pub insurance_id: String,
}

/// Appointment row joined with the patient name and doctor email
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub patient_name: String,
    pub doctor_id: Option<Uuid>,
    pub doctor_email: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub notes: Option<String>,
    pub status: String,
}

/// Prescription row joined with the patient name and doctor email
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbPrescription {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub patient_name: String,
    pub doctor_id: Uuid,
    pub doctor_email: String,
    pub medication: String,
    pub dosage: String,
    pub instructions: String,
    pub date_prescribed: DateTime<Utc>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbInventoryItem {
    pub id: Uuid,
    pub medicine_name: String,
    pub quantity: i32,
    pub expiry_date: NaiveDate,
    pub threshold: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUserRegistrationRow {
    pub month: NaiveDate,
    pub role: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbPrescriptionStatRow {
    pub medication: String,
    pub count: i64,
    pub patients: i64,
    pub active: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointmentTrendRow {
    pub month: NaiveDate,
    pub status: String,
    pub count: i64,
}

impl TryFrom<DbUser> for User {
    type Error = ClinicError;

    fn try_from(row: DbUser) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            email: row.email,
            role: row.role.parse()?,
            first_name: row.first_name,
            last_name: row.last_name,
            is_active: row.is_active,
            date_joined: row.date_joined,
        })
    }
}

impl TryFrom<DbPatient> for Patient {
    type Error = ClinicError;

    fn try_from(row: DbPatient) -> Result<Self, Self::Error> {
        Ok(Patient {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            age: row.age,
            gender: row.gender.as_deref().map(str::parse).transpose()?,
            contact: row.contact,
            medical_history: row.medical_history,
            blood_type: row.blood_type.as_deref().map(str::parse).transpose()?,
            allergies: row.allergies,
            chronic_conditions: row.chronic_conditions,
            last_physical: row.last_physical,
            insurance_provider: row.insurance_provider,
            insurance_id: row.insurance_id,
        })
    }
}

impl DbAppointment {
    /// The stored fields, as accepted by the create and update queries
    pub fn to_new_appointment(&self) -> Result<NewAppointment, ClinicError> {
        Ok(NewAppointment {
            patient_id: self.patient_id,
            doctor_id: self.doctor_id,
            date: self.date,
            time: self.time,
            notes: self.notes.clone(),
            status: self.status.parse()?,
        })
    }
}

impl TryFrom<DbAppointment> for Appointment {
    type Error = ClinicError;

    fn try_from(row: DbAppointment) -> Result<Self, Self::Error> {
        let status: AppointmentStatus = row.status.parse()?;

        Ok(Appointment {
            id: row.id,
            patient_id: row.patient_id,
            patient_name: row.patient_name,
            doctor_id: row.doctor_id,
            doctor_name: row.doctor_email,
            date: row.date,
            time: row.time,
            notes: row.notes,
            status,
        })
    }
}

impl From<DbPrescription> for Prescription {
    fn from(row: DbPrescription) -> Self {
        Prescription {
            id: row.id,
            patient_id: row.patient_id,
            patient_name: row.patient_name,
            doctor_id: row.doctor_id,
            doctor_name: row.doctor_email,
            medication: row.medication,
            dosage: row.dosage,
            instructions: row.instructions,
            date_prescribed: row.date_prescribed,
            is_active: row.is_active,
        }
    }
}

impl From<DbInventoryItem> for InventoryItem {
    fn from(row: DbInventoryItem) -> Self {
        InventoryItem {
            needs_restock: needs_restock(row.quantity, row.threshold),
            id: row.id,
            medicine_name: row.medicine_name,
            quantity: row.quantity,
            expiry_date: row.expiry_date,
            threshold: row.threshold,
        }
    }
}

impl From<DbInventoryItem> for InventoryStatusStat {
    fn from(row: DbInventoryItem) -> Self {
        InventoryStatusStat::new(row.medicine_name, row.quantity, row.threshold)
    }
}

impl TryFrom<DbUserRegistrationRow> for UserRegistrationStat {
    type Error = ClinicError;

    fn try_from(row: DbUserRegistrationRow) -> Result<Self, Self::Error> {
        Ok(UserRegistrationStat {
            month: row.month,
            role: row.role.parse()?,
            count: row.count,
        })
    }
}

impl From<DbPrescriptionStatRow> for PrescriptionStat {
    fn from(row: DbPrescriptionStatRow) -> Self {
        PrescriptionStat {
            medication: row.medication,
            count: row.count,
            patients: row.patients,
            active: row.active,
        }
    }
}

impl TryFrom<DbAppointmentTrendRow> for AppointmentTrendStat {
    type Error = ClinicError;

    fn try_from(row: DbAppointmentTrendRow) -> Result<Self, Self::Error> {
        Ok(AppointmentTrendStat::new(row.month, row.status.parse()?, row.count))
    }
}
