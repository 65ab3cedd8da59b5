pub mod appointments;
pub mod auth;
pub mod doctors;
pub mod health;
pub mod inventory;
pub mod patients;
pub mod prescriptions;
pub mod reports;
pub mod users;
