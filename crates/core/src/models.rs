pub mod appointment;
pub mod auth;
pub mod availability;
pub mod inventory;
pub mod patient;
pub mod prescription;
pub mod report;
pub mod user;
