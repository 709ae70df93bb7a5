use chrono::{DateTime, Utc};
use credit_sim::config::RulesConfig;
use credit_sim::credit::{
    ApplicantRecord, JsonFileRules, MemoryRules, RulePersistence, RuleStore,
};
use credit_sim::error::AppError;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

pub(crate) type Store = RuleStore<Box<dyn RulePersistence>>;

/// File-backed store unless persistence is switched off.
pub(crate) fn open_store(config: &RulesConfig) -> Store {
    let persistence: Box<dyn RulePersistence> = if config.persist {
        Box::new(JsonFileRules::new(config.path.clone()))
    } else {
        Box::new(MemoryRules::default())
    };
    RuleStore::open(persistence)
}

pub(crate) fn read_json(path: &Path) -> Result<Value, AppError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub(crate) fn applicant_name(record: &ApplicantRecord) -> Option<&str> {
    ["name", "nombre"]
        .iter()
        .find_map(|key| record.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|name| !name.is_empty())
}

/// Stamps a payload with the evaluation time.
#[derive(Debug, Serialize)]
pub(crate) struct Envelope<T> {
    pub(crate) evaluated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub(crate) body: T,
}

impl<T: Serialize> Envelope<T> {
    pub(crate) fn now(body: T) -> Self {
        Self {
            evaluated_at: Utc::now(),
            body,
        }
    }

    pub(crate) fn print(&self) -> Result<(), AppError> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn applicant_name_prefers_english_key() {
        let record = match json!({ "name": " Ana ", "nombre": "Otra" }) {
            Value::Object(record) => record,
            _ => unreachable!(),
        };
        assert_eq!(applicant_name(&record), Some("Ana"));
    }

    #[test]
    fn envelope_flattens_body() {
        let envelope = Envelope::now(json!({ "approved": true }));
        let value = serde_json::to_value(&envelope).expect("serializes");
        assert_eq!(value["approved"], json!(true));
        assert!(value["evaluated_at"].is_string());
    }

    #[test]
    fn disabled_persistence_keeps_rules_in_memory() {
        let config = RulesConfig {
            path: "/nonexistent/dir/rules.json".into(),
            persist: false,
        };
        let store = open_store(&config);
        assert!(store.persistence().load().expect("memory load").is_some());
    }
}
