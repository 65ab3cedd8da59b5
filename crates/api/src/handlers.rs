pub mod appointments;
pub mod auth;
pub mod availability;
pub mod inventory;
pub mod modules;
pub mod patients;
pub mod prescriptions;
pub mod reports;
pub mod users;
