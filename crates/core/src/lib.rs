//! Domain types for Clinicare: errors, request/response models and the
//! doctor availability calculator.

pub mod availability;
pub mod errors;
pub mod models;
