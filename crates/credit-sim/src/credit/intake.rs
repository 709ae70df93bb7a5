//! Boundary adapter from loose key-value applicant records to [`ApplicantProfile`].
//!
//! Records arrive from JSON bodies or CSV rows with either the legacy Spanish field names
//! or their English equivalents. Numbers may be JSON numbers or numeric strings. Every type
//! coercion and range check happens here so the engine only ever sees typed data.

use std::io::Read;

use serde_json::{Map, Value};

use super::domain::ApplicantProfile;

/// Flat key-value applicant record.
pub type ApplicantRecord = Map<String, Value>;

const NAME: &[&str] = &["name", "nombre"];
const AGE: &[&str] = &["age", "edad"];
const CREDIT_SCORE: &[&str] = &["credit_score", "score_crediticio"];
const MONTHLY_INCOME: &[&str] = &["monthly_income", "ingresos_mensuales"];
const MONTHLY_DEBT: &[&str] = &["monthly_debt", "deudas_actuales"];
const TENURE_MONTHS: &[&str] = &["employment_tenure_months", "tenure", "antiguedad_laboral"];
const TENURE_YEARS: &[&str] = &["tenure_years", "antiguedad_laboral_anos"];
const REQUESTED_AMOUNT: &[&str] = &["requested_amount", "monto_solicitado"];
const PURPOSE: &[&str] = &["purpose", "proposito"];

const DEFAULT_PURPOSE: &str = "personal";
const CREDIT_SCORE_RANGE: (u64, u64) = (300, 850);
const MAX_AGE: u64 = 120;

/// Reason an applicant record could not become a profile.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error("missing required field `{field}`")]
    Missing { field: &'static str },
    #[error("field `{field}` must be numeric (got {value})")]
    NotANumber { field: &'static str, value: String },
    #[error("field `{field}` must be a whole number (got {value})")]
    NotAWholeNumber { field: &'static str, value: f64 },
    #[error("field `{field}` out of range: {value} (expected {expected})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        expected: String,
    },
}

/// Failure reading a batch of records.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("unable to read applicant CSV: {0}")]
    Csv(#[from] csv::Error),
}

pub fn parse_profile(record: &ApplicantRecord) -> Result<ApplicantProfile, ProfileError> {
    let age = required_whole(record, AGE)?;
    if age > MAX_AGE {
        return Err(out_of_range(AGE[0], age as f64, format!("0-{MAX_AGE}")));
    }

    let credit_score = required_whole(record, CREDIT_SCORE)?;
    let (low, high) = CREDIT_SCORE_RANGE;
    if !(low..=high).contains(&credit_score) {
        return Err(out_of_range(
            CREDIT_SCORE[0],
            credit_score as f64,
            format!("{low}-{high}"),
        ));
    }

    let monthly_income = required_number(record, MONTHLY_INCOME)?;
    let monthly_income = non_negative(MONTHLY_INCOME[0], monthly_income)?;
    let monthly_debt = match optional_number(record, MONTHLY_DEBT)? {
        Some(debt) => non_negative(MONTHLY_DEBT[0], debt)?,
        None => 0.0,
    };

    let employment_tenure_months = tenure_months(record)?;

    let requested_amount =
        optional_number(record, REQUESTED_AMOUNT)?.filter(|amount| *amount > 0.0);

    Ok(ApplicantProfile {
        name: text(record, NAME).unwrap_or_default(),
        age: age as u8,
        credit_score: credit_score as u16,
        monthly_income,
        monthly_debt,
        employment_tenure_months,
        requested_amount,
        purpose: text(record, PURPOSE).unwrap_or_else(|| DEFAULT_PURPOSE.to_string()),
    })
}

/// Reads CSV rows keyed by the header line; blank cells count as absent.
pub fn read_csv_records<R: Read>(reader: R) -> Result<Vec<ApplicantRecord>, IntakeError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let record = headers
            .iter()
            .zip(row.iter())
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(header, cell)| (header.to_string(), Value::String(cell.to_string())))
            .collect();
        records.push(record);
    }

    Ok(records)
}

/// Months field wins over the explicit years field.
fn tenure_months(record: &ApplicantRecord) -> Result<u32, ProfileError> {
    if let Some((field, value)) = lookup(record, TENURE_MONTHS) {
        let months = whole(field, number(field, value)?)?;
        return u32::try_from(months)
            .map_err(|_| out_of_range(field, months as f64, "a month count".to_string()));
    }

    match lookup(record, TENURE_YEARS) {
        Some((field, value)) => {
            let years = non_negative(field, number(field, value)?)?;
            Ok((years * 12.0).round() as u32)
        }
        None => Err(ProfileError::Missing {
            field: TENURE_MONTHS[0],
        }),
    }
}

/// First alias carrying a non-null, non-blank value.
fn lookup<'a>(
    record: &'a ApplicantRecord,
    aliases: &[&'static str],
) -> Option<(&'static str, &'a Value)> {
    aliases.iter().find_map(|alias| {
        record
            .get(*alias)
            .filter(|value| !is_blank(value))
            .map(|value| (*alias, value))
    })
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(raw) => raw.trim().is_empty(),
        _ => false,
    }
}

fn number(field: &'static str, value: &Value) -> Result<f64, ProfileError> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => raw.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed
        .filter(|number| number.is_finite())
        .ok_or_else(|| ProfileError::NotANumber {
            field,
            value: value.to_string(),
        })
}

fn whole(field: &'static str, value: f64) -> Result<u64, ProfileError> {
    if value < 0.0 {
        return Err(out_of_range(field, value, "a non-negative value".to_string()));
    }
    if value.fract() != 0.0 {
        return Err(ProfileError::NotAWholeNumber { field, value });
    }
    Ok(value as u64)
}

fn non_negative(field: &'static str, value: f64) -> Result<f64, ProfileError> {
    if value < 0.0 {
        Err(out_of_range(field, value, "a non-negative value".to_string()))
    } else {
        Ok(value)
    }
}

fn required_number(
    record: &ApplicantRecord,
    aliases: &[&'static str],
) -> Result<f64, ProfileError> {
    match lookup(record, aliases) {
        Some((field, value)) => number(field, value),
        None => Err(ProfileError::Missing { field: aliases[0] }),
    }
}

fn required_whole(
    record: &ApplicantRecord,
    aliases: &[&'static str],
) -> Result<u64, ProfileError> {
    match lookup(record, aliases) {
        Some((field, value)) => whole(field, number(field, value)?),
        None => Err(ProfileError::Missing { field: aliases[0] }),
    }
}

fn optional_number(
    record: &ApplicantRecord,
    aliases: &[&'static str],
) -> Result<Option<f64>, ProfileError> {
    lookup(record, aliases)
        .map(|(field, value)| number(field, value))
        .transpose()
}

fn text(record: &ApplicantRecord, aliases: &[&'static str]) -> Option<String> {
    lookup(record, aliases).map(|(_, value)| match value {
        Value::String(raw) => raw.trim().to_string(),
        other => other.to_string(),
    })
}

fn out_of_range(field: &'static str, value: f64, expected: String) -> ProfileError {
    ProfileError::OutOfRange {
        field,
        value,
        expected,
    }
}
