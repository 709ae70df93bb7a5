use serde_json::{Map, Value};
use tracing::debug;

use super::RuleSet;

/// Override document that could not be merged into a rule set.
#[derive(Debug, thiserror::Error)]
pub enum OverrideError {
    #[error("rule overrides must be a JSON object")]
    NotAnObject,
    #[error("rule override `{key}` must be an object")]
    ExpectedObject { key: String },
    #[error("rule overrides do not describe a valid rule set: {0}")]
    Shape(#[from] serde_json::Error),
}

/// Key names used by older rules files.
const LEGACY_KEYS: &[(&str, &str)] = &[
    ("score_minimo", "min_credit_score"),
    ("edad_minima", "min_age"),
    ("edad_maxima", "max_age"),
    ("ingresos_minimos", "min_monthly_income"),
    ("ratio_deuda_ingreso_maximo", "max_debt_to_income_ratio"),
    ("monto_maximo_por_perfil", "max_amount_by_tier"),
    ("tasas_por_perfil", "rate_band_by_tier"),
    ("plazos_por_perfil", "term_band_by_tier"),
];

/// Legacy tenure threshold, stored in years.
const LEGACY_TENURE_YEARS: &str = "antiguedad_laboral_minima";

pub(super) fn merge(base: &RuleSet, overrides: &Value) -> Result<RuleSet, OverrideError> {
    let overlay = overrides.as_object().ok_or(OverrideError::NotAnObject)?;
    let overlay = translate_legacy(overlay);

    let mut document = serde_json::to_value(base)?;
    merge_known(&mut document, &overlay, "")?;
    Ok(serde_json::from_value(document)?)
}

/// Rewrites legacy keys to their current names. Current names win when both are present.
fn translate_legacy(overlay: &Map<String, Value>) -> Map<String, Value> {
    let mut translated = Map::new();

    for (key, value) in overlay {
        let legacy = LEGACY_KEYS
            .iter()
            .find(|(legacy, _)| *legacy == key.as_str());
        if let Some((_, current)) = legacy {
            if !overlay.contains_key(*current) {
                translated.insert((*current).to_string(), value.clone());
            }
        } else if key == LEGACY_TENURE_YEARS {
            if overlay.contains_key("min_tenure_months") {
                continue;
            }
            // Non-numeric values pass through untouched so deserialization rejects them.
            let months = value
                .as_f64()
                .map(|years| Value::from((years * 12.0).round() as u64))
                .unwrap_or_else(|| value.clone());
            debug!(years = %value, months = %months, "converted legacy tenure threshold");
            translated.insert("min_tenure_months".to_string(), months);
        } else {
            translated.insert(key.clone(), value.clone());
        }
    }

    translated
}

/// Objects merge key by key; every other value replaces the slot wholesale.
fn merge_known(
    target: &mut Value,
    overlay: &Map<String, Value>,
    path: &str,
) -> Result<(), OverrideError> {
    let Some(target) = target.as_object_mut() else {
        return Err(OverrideError::ExpectedObject {
            key: path.to_string(),
        });
    };

    for (key, value) in overlay {
        let key_path = if path.is_empty() {
            key.clone()
        } else {
            format!("{path}.{key}")
        };

        let Some(slot) = target.get_mut(key) else {
            debug!(key = %key_path, "ignoring unknown rule override");
            continue;
        };

        if slot.is_object() {
            let nested = value
                .as_object()
                .ok_or_else(|| OverrideError::ExpectedObject {
                    key: key_path.clone(),
                })?;
            merge_known(slot, nested, &key_path)?;
        } else {
            *slot = value.clone();
        }
    }

    Ok(())
}
