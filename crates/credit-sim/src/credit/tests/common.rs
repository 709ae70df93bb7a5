use serde_json::{json, Value};

use crate::credit::domain::ApplicantProfile;
use crate::credit::intake::ApplicantRecord;
use crate::credit::rules::RuleSet;

/// Strong applicant passing every hard requirement under the default rules.
pub(super) fn applicant() -> ApplicantProfile {
    ApplicantProfile {
        name: "Ana Torres".to_string(),
        age: 35,
        credit_score: 820,
        monthly_income: 60_000.0,
        monthly_debt: 5_000.0,
        employment_tenure_months: 60,
        requested_amount: Some(150_000.0),
        purpose: "personal".to_string(),
    }
}

/// Applicant that passes the permissive gate but scores below every tier floor.
pub(super) fn weak_applicant() -> ApplicantProfile {
    ApplicantProfile {
        name: "Weak".to_string(),
        age: 70,
        credit_score: 580,
        monthly_income: 5_000.0,
        monthly_debt: 2_500.0,
        employment_tenure_months: 0,
        requested_amount: None,
        purpose: "personal".to_string(),
    }
}

pub(super) fn rules() -> RuleSet {
    RuleSet::default()
}

/// Rules whose hard gate lets almost anyone through to the scorer.
pub(super) fn permissive_rules() -> RuleSet {
    RuleSet {
        min_credit_score: 300,
        min_age: 18,
        max_age: 99,
        min_monthly_income: 0.0,
        min_tenure_months: 0,
        max_debt_to_income_ratio: 1.0,
        ..RuleSet::default()
    }
}

pub(super) fn record(value: Value) -> ApplicantRecord {
    match value {
        Value::Object(record) => record,
        other => panic!("test record must be an object, got {other}"),
    }
}

pub(super) fn spanish_record() -> ApplicantRecord {
    record(json!({
        "nombre": "Cliente AAA Test",
        "edad": 35,
        "score_crediticio": 820,
        "ingresos_mensuales": 60000,
        "deudas_actuales": 5000,
        "antiguedad_laboral": 60,
        "monto_solicitado": 150000,
        "proposito": "vivienda",
    }))
}

pub(super) fn assert_close(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() <= epsilon,
        "expected {expected} ± {epsilon}, got {actual}"
    );
}
