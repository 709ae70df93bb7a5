use std::sync::Arc;

use serde_json::json;

use super::common::*;
use crate::credit::domain::Tier;
use crate::credit::evaluation::{evaluate, CreditEvaluator, DeclineReason, RequirementViolation};
use crate::credit::presets::{preset, PRESET_NAMES};

fn evaluator() -> CreditEvaluator {
    CreditEvaluator::new(Arc::new(rules()))
}

#[test]
fn strong_applicant_is_approved_with_offer() {
    let result = evaluate(&applicant(), &rules());

    assert!(result.approved());
    assert_eq!(result.tier(), Tier::Aaa);
    assert_eq!(result.score(), Some(100));
    assert!(result.decline_reason().is_none());

    let offer = result.offer().expect("approved result carries an offer");
    assert_eq!(offer.amount, 150_000.0);
    assert_eq!(offer.monthly_payment, 3_077.48);
    assert_eq!(
        result.decision.summary(),
        "approved: 150000.00 at 8.50% over 60 months"
    );
}

#[test]
fn gate_failure_declines_before_scoring() {
    let mut profile = applicant();
    profile.credit_score = 600;

    let result = evaluate(&profile, &rules());

    assert!(!result.approved());
    assert!(result.risk.is_none());
    assert_eq!(result.tier(), Tier::Rejected);
    assert_eq!(result.score(), None);
    let reason = result.decline_reason().expect("declined");
    assert_eq!(reason.summary(), "does not meet basic requirements");
    assert_eq!(
        reason.violations(),
        &[RequirementViolation::CreditScoreBelowMinimum {
            actual: 600,
            minimum: 650
        }]
    );
}

#[test]
fn low_score_is_a_soft_decline_with_risk_profile() {
    let result = evaluate(&weak_applicant(), &permissive_rules());

    assert!(!result.approved());
    assert_eq!(result.decline_reason(), Some(&DeclineReason::HighRisk));
    assert_eq!(result.tier(), Tier::Rejected);
    assert_eq!(result.score(), Some(11));
    assert!(result.offer().is_none());
    assert_eq!(
        result.decision.summary(),
        "declined: risk profile too high"
    );
}

#[test]
fn unreadable_record_is_declined_as_invalid_input() {
    let mut input = spanish_record();
    input.remove("score_crediticio");

    let result = evaluator().evaluate_record(&input);

    assert!(!result.approved());
    assert!(result.risk.is_none());
    match result.decline_reason() {
        Some(DeclineReason::InvalidInput(detail)) => {
            assert!(detail.contains("credit_score"), "detail was {detail}")
        }
        other => panic!("expected invalid input, got {other:?}"),
    }

    let result = evaluator().evaluate_value(&json!(["not", "an", "object"]));
    assert!(matches!(
        result.decline_reason(),
        Some(DeclineReason::InvalidInput(_))
    ));
}

#[test]
fn evaluation_does_not_mutate_rules() {
    let rules = rules();
    let before = rules.clone();

    let first = evaluate(&applicant(), &rules);
    let second = evaluate(&applicant(), &rules);

    assert_eq!(rules, before);
    assert_eq!(first, second);
}

#[test]
fn presets_land_on_their_named_tiers() {
    let evaluator = evaluator();
    let expected = [
        ("AAA", Tier::Aaa, 100),
        ("AA", Tier::Aa, 83),
        ("A", Tier::A, 69),
    ];

    for (name, tier, score) in expected {
        let record = preset(name).expect("preset exists");
        let result = evaluator.evaluate_record(&record);
        assert!(result.approved(), "preset {name}");
        assert_eq!(result.tier(), tier, "preset {name}");
        assert_eq!(result.score(), Some(score), "preset {name}");
    }

    let result = evaluator.evaluate_record(&preset("reject").expect("preset exists"));
    assert!(!result.approved());
    assert_eq!(
        result.decline_reason().map(|reason| reason.violations().len()),
        Some(4)
    );

    assert_eq!(PRESET_NAMES.len(), 4);
    assert!(preset("platinum").is_none());
}

#[test]
fn approved_view_uses_boundary_keys() {
    let value = serde_json::to_value(evaluate(&applicant(), &rules()).view())
        .expect("view serializes");

    assert_eq!(value["approved"], json!(true));
    assert!(value.get("motivo_rechazo").is_none());
    assert!(value.get("errores").is_none());
    assert_eq!(value["perfil_riesgo"]["perfil"], json!("AAA"));
    assert_eq!(value["perfil_riesgo"]["score_total"], json!(100));
    assert_eq!(
        value["perfil_riesgo"]["factores"][0]["label"],
        json!("Excellent credit score (800+)")
    );
    assert_eq!(value["oferta_credito"]["monto_aprobado"], json!(150_000.0));
    assert_eq!(value["oferta_credito"]["tasa_anual"], json!(8.5));
    assert_eq!(value["oferta_credito"]["plazo_meses"], json!(60));
    assert_eq!(value["oferta_credito"]["pago_mensual"], json!(3_077.48));
    assert_eq!(value["oferta_credito"]["total_a_pagar"], json!(184_648.78));
    assert_eq!(value["oferta_credito"]["intereses_totales"], json!(34_648.78));
}

#[test]
fn declined_views_list_reasons() {
    let mut profile = applicant();
    profile.monthly_income = 10_000.0;
    profile.monthly_debt = 5_000.0;

    let hard = serde_json::to_value(evaluate(&profile, &rules()).view()).expect("serializes");
    assert_eq!(hard["approved"], json!(false));
    assert_eq!(hard["motivo_rechazo"], json!("does not meet basic requirements"));
    assert_eq!(
        hard["errores"],
        json!([
            "insufficient income: $10000 < $15000",
            "excessive debt-to-income ratio: 50.00% > 35.00%",
        ])
    );
    assert!(hard.get("perfil_riesgo").is_none());
    assert!(hard.get("oferta_credito").is_none());

    let soft = serde_json::to_value(evaluate(&weak_applicant(), &permissive_rules()).view())
        .expect("serializes");
    assert_eq!(soft["motivo_rechazo"], json!("risk profile too high"));
    assert!(soft.get("errores").is_none());
    assert_eq!(soft["perfil_riesgo"]["perfil"], json!("REJECTED"));
    assert!(soft.get("oferta_credito").is_none());
}
