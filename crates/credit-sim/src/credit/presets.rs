//! Canned applicant records for demos and smoke checks.

use serde_json::{json, Value};

use super::intake::ApplicantRecord;

pub const PRESET_NAMES: [&str; 4] = ["AAA", "AA", "A", "REJECT"];

/// Record for a preset name, case-insensitive. Each record lands on its named tier under
/// the default rules.
pub fn preset(name: &str) -> Option<ApplicantRecord> {
    let value = match name.trim().to_ascii_uppercase().as_str() {
        "AAA" => json!({
            "nombre": "AAA test applicant",
            "edad": 35,
            "score_crediticio": 820,
            "ingresos_mensuales": 60000,
            "deudas_actuales": 5000,
            "antiguedad_laboral": 60,
            "monto_solicitado": 150000,
        }),
        "AA" => json!({
            "nombre": "AA test applicant",
            "edad": 30,
            "score_crediticio": 760,
            "ingresos_mensuales": 45000,
            "deudas_actuales": 8000,
            "antiguedad_laboral": 48,
            "monto_solicitado": 120000,
        }),
        "A" => json!({
            "nombre": "A test applicant",
            "edad": 30,
            "score_crediticio": 700,
            "ingresos_mensuales": 25000,
            "deudas_actuales": 6000,
            "antiguedad_laboral": 24,
            "monto_solicitado": 80000,
        }),
        "REJECT" => json!({
            "nombre": "Rejected test applicant",
            "edad": 22,
            "score_crediticio": 580,
            "ingresos_mensuales": 12000,
            "deudas_actuales": 8000,
            "antiguedad_laboral": 0,
            "monto_solicitado": 50000,
        }),
        _ => return None,
    };

    match value {
        Value::Object(record) => Some(record),
        _ => None,
    }
}
