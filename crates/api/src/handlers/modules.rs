use axum::Json;
use serde::Serialize;

/// Feature areas exposed by this backend
pub const MODULES: [&str; 5] = [
    "Patients",
    "Appointments",
    "Inventory",
    "Reports",
    "Prescriptions",
];

#[derive(Debug, Serialize)]
pub struct ModulesResponse {
    pub modules: Vec<&'static str>,
}

pub async fn list_modules() -> Json<ModulesResponse> {
    Json(ModulesResponse {
        modules: MODULES.to_vec(),
    })
}
