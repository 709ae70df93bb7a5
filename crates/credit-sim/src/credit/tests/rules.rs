use serde_json::json;

use super::common::*;
use crate::credit::domain::Tier;
use crate::credit::rules::{OverrideError, RateBand, RuleSet, TermBand};

#[test]
fn defaults_are_consistent() {
    let rules = RuleSet::default();
    let lines = rules.validate();

    assert!(rules.is_consistent());
    assert_eq!(lines.len(), 22);
    assert!(lines.iter().all(|line| line.starts_with("✓ ")), "{lines:?}");
    assert!(lines.contains(&"✓ Valid age range (18-70)".to_string()));
    assert!(lines.contains(&"✓ AAA rates valid (8.50%-12.00%)".to_string()));
    assert!(lines.contains(&"✓ Maximum attainable score 100".to_string()));
}

#[test]
fn default_limits_per_tier() {
    let rules = RuleSet::default();

    assert_eq!(rules.max_amount_by_tier.get(Tier::Aaa), Some(&200_000.0));
    assert_eq!(rules.max_amount_by_tier.get(Tier::B), Some(&25_000.0));
    assert_eq!(rules.max_amount_by_tier.get(Tier::Rejected), None);
    assert_eq!(
        rules.rate_band_by_tier.get(Tier::Bb),
        Some(&RateBand { min: 22.0, max: 28.0 })
    );
    assert_eq!(
        rules.term_band_by_tier.get(Tier::Bb),
        Some(&TermBand { min: 6, max: 18 })
    );

    let tiers: Vec<Tier> = rules.rate_band_by_tier.iter().map(|(tier, _)| tier).collect();
    assert_eq!(tiers, Tier::APPROVABLE.to_vec());
}

#[test]
fn inconsistent_rules_are_flagged() {
    let mut rules = RuleSet {
        min_age: 70,
        max_age: 18,
        ..RuleSet::default()
    };
    rules.rate_band_by_tier.a = RateBand { min: 18.0, max: 15.0 };
    rules.scoring.credit_score.bands[0].points = 60;

    let checks = rules.checks();
    let failures: Vec<String> = checks
        .iter()
        .filter(|check| !check.passed)
        .map(|check| check.line())
        .collect();

    assert!(!rules.is_consistent());
    assert_eq!(
        failures,
        vec![
            "❌ Invalid age range: min_age 70 must be below max_age 18".to_string(),
            "❌ A rates invalid: min 18.00% must be below max 15.00%".to_string(),
            "❌ Maximum attainable score 120 exceeds 100".to_string(),
        ]
    );
}

#[test]
fn out_of_bounds_ratio_is_flagged() {
    let rules = RuleSet {
        max_debt_to_income_ratio: 1.5,
        ..RuleSet::default()
    };
    assert!(rules
        .validate()
        .contains(&"❌ Invalid debt-to-income ratio 1.50: must be in (0, 1]".to_string()));
}

#[test]
fn missing_overrides_yield_defaults() {
    assert_eq!(RuleSet::load(None), RuleSet::default());
    assert_eq!(RuleSet::load(Some(&json!({}))), RuleSet::default());
}

#[test]
fn partial_override_keeps_siblings() {
    let rules = RuleSet::load(Some(&json!({
        "min_credit_score": 700,
        "rate_band_by_tier": { "AAA": { "min": 7.0 } },
        "max_amount_by_tier": { "B": 30000.0 },
    })));

    assert_eq!(rules.min_credit_score, 700);
    assert_eq!(rules.rate_band_by_tier.aaa, RateBand { min: 7.0, max: 12.0 });
    assert_eq!(rules.rate_band_by_tier.aa, RateBand { min: 12.0, max: 15.0 });
    assert_eq!(rules.max_amount_by_tier.b, 30_000.0);
    assert_eq!(rules.max_amount_by_tier.aaa, 200_000.0);
    assert_eq!(rules.min_age, 18);
}

#[test]
fn unknown_keys_are_ignored() {
    let rules = RuleSet::load(Some(&json!({
        "max_age": 65,
        "favorite_color": "teal",
        "rate_band_by_tier": { "AAAA": { "min": 1.0, "max": 2.0 } },
    })));

    let expected = RuleSet {
        max_age: 65,
        ..RuleSet::default()
    };
    assert_eq!(rules, expected);
}

#[test]
fn legacy_keys_are_translated() {
    let rules = RuleSet::load(Some(&json!({
        "score_minimo": 680,
        "edad_maxima": 65,
        "ratio_deuda_ingreso_maximo": 0.4,
        "antiguedad_laboral_minima": 2,
        "tasas_por_perfil": { "B": { "max": 30.0 } },
    })));

    assert_eq!(rules.min_credit_score, 680);
    assert_eq!(rules.max_age, 65);
    assert_eq!(rules.max_debt_to_income_ratio, 0.4);
    assert_eq!(rules.min_tenure_months, 24);
    assert_eq!(rules.rate_band_by_tier.b, RateBand { min: 28.0, max: 30.0 });
}

#[test]
fn current_names_win_over_legacy_names() {
    let rules = RuleSet::load(Some(&json!({
        "score_minimo": 680,
        "min_credit_score": 720,
        "antiguedad_laboral_minima": 3,
        "min_tenure_months": 6,
    })));

    assert_eq!(rules.min_credit_score, 720);
    assert_eq!(rules.min_tenure_months, 6);
}

#[test]
fn malformed_override_falls_back_to_defaults() {
    assert_eq!(
        RuleSet::load(Some(&json!({ "min_credit_score": "high" }))),
        RuleSet::default()
    );
    assert_eq!(RuleSet::load(Some(&json!([1, 2, 3]))), RuleSet::default());
    assert_eq!(
        RuleSet::load(Some(&json!({ "rate_band_by_tier": 5 }))),
        RuleSet::default()
    );
}

#[test]
fn merged_reports_why_an_override_failed() {
    let base = rules();

    assert!(matches!(
        base.merged(&json!("nope")),
        Err(OverrideError::NotAnObject)
    ));
    match base.merged(&json!({ "term_band_by_tier": { "AA": 48 } })) {
        Err(OverrideError::ExpectedObject { key }) => assert_eq!(key, "term_band_by_tier.AA"),
        other => panic!("expected nested object error, got {other:?}"),
    }
    assert!(matches!(
        base.merged(&json!({ "min_age": -3 })),
        Err(OverrideError::Shape(_))
    ));
}

#[test]
fn scoring_model_can_be_recalibrated() {
    let mut document = rules().to_document().expect("rules serialize");
    document["scoring"]["tier_floors"][0]["min_score"] = json!(90);

    let rules = RuleSet::load(Some(&document));
    assert_eq!(rules.scoring.tier_for(89), Tier::Aa);
    assert_eq!(rules.scoring.tier_for(90), Tier::Aaa);
}

#[test]
fn document_round_trips_through_load() {
    let mut custom = rules();
    custom.min_monthly_income = 18_000.0;
    custom.term_breakpoints.pop();

    let document = custom.to_document().expect("rules serialize");
    assert_eq!(document["min_monthly_income"], json!(18_000.0));
    assert_eq!(RuleSet::load(Some(&document)), custom);
}

#[test]
fn oversized_band_points_fail_validation_without_panicking() {
    let rules = rules()
        .merged(&json!({
            "scoring": {
                "credit_score": { "fallback": { "points": 30000 } },
                "monthly_income": { "fallback": { "points": 40000 } },
            }
        }))
        .expect("override merges");

    assert_eq!(rules.scoring.max_score(), u16::MAX);
    assert!(!rules.is_consistent());
    assert!(rules
        .validate()
        .contains(&format!("❌ Maximum attainable score {} exceeds 100", u16::MAX)));
}
