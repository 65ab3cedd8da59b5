use chrono::{NaiveDate, NaiveTime};
use clinicare_core::models::appointment::NewAppointment;
use mockall::mock;
use uuid::Uuid;

use crate::models::{DbAppointment, DbInventoryItem, DbPatient, DbUser};

// Mock repositories for testing
mock! {
    pub UserRepo {
        pub async fn get_user_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbUser>>;

        pub async fn get_user_by_email(
            &self,
            email: &'static str,
        ) -> eyre::Result<Option<DbUser>>;
    }
}

mock! {
    pub PatientRepo {
        pub async fn get_patient_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbPatient>>;
    }
}

mock! {
    pub AppointmentRepo {
        pub async fn create_appointment(
            &self,
            appointment: NewAppointment,
        ) -> eyre::Result<DbAppointment>;

        pub async fn get_booked_times(
            &self,
            doctor_id: Uuid,
            date: NaiveDate,
        ) -> eyre::Result<Vec<NaiveTime>>;
    }
}

mock! {
    pub InventoryRepo {
        pub async fn list_inventory_items(
            &self,
            restock_only: bool,
        ) -> eyre::Result<Vec<DbInventoryItem>>;
    }
}
