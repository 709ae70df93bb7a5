use super::common::*;
use crate::credit::evaluation::{check_requirements, RequirementViolation};

#[test]
fn strong_applicant_passes_every_requirement() {
    assert!(check_requirements(&applicant(), &rules()).is_empty());
}

#[test]
fn low_income_is_rejected_regardless_of_credit_score() {
    let mut profile = applicant();
    profile.monthly_income = 12_000.0;
    profile.monthly_debt = 1_000.0;

    let violations = check_requirements(&profile, &rules());

    assert_eq!(
        violations,
        vec![RequirementViolation::InsufficientIncome {
            actual: 12_000.0,
            minimum: 15_000.0,
        }]
    );
    assert!(violations[0].summary().contains("insufficient income"));
}

#[test]
fn reports_every_violation_instead_of_the_first() {
    let mut profile = applicant();
    profile.credit_score = 600;
    profile.age = 17;
    profile.employment_tenure_months = 6;

    let violations = check_requirements(&profile, &rules());

    assert_eq!(violations.len(), 3);
    assert!(matches!(
        violations[0],
        RequirementViolation::CreditScoreBelowMinimum {
            actual: 600,
            minimum: 650
        }
    ));
    assert!(matches!(
        violations[1],
        RequirementViolation::AgeOutOfRange {
            actual: 17,
            min: 18,
            max: 70
        }
    ));
    assert!(matches!(
        violations[2],
        RequirementViolation::InsufficientTenure {
            actual_months: 6,
            minimum_months: 12
        }
    ));
}

#[test]
fn zero_income_counts_as_maximal_debt_ratio() {
    let mut profile = applicant();
    profile.monthly_income = 0.0;
    profile.monthly_debt = 0.0;

    let violations = check_requirements(&profile, &rules());

    assert!(violations.iter().any(|violation| matches!(
        violation,
        RequirementViolation::ExcessiveDebtToIncome { actual_ratio, .. } if *actual_ratio == 1.0
    )));
    assert!(violations
        .iter()
        .any(|violation| matches!(violation, RequirementViolation::InsufficientIncome { .. })));
}

#[test]
fn age_bounds_are_inclusive() {
    let mut profile = applicant();
    profile.age = 18;
    assert!(check_requirements(&profile, &rules()).is_empty());
    profile.age = 70;
    assert!(check_requirements(&profile, &rules()).is_empty());
    profile.age = 71;
    assert_eq!(check_requirements(&profile, &rules()).len(), 1);
}

#[test]
fn debt_ratio_at_the_limit_passes() {
    let mut profile = applicant();
    profile.monthly_income = 20_000.0;
    profile.monthly_debt = 7_000.0;
    assert!(check_requirements(&profile, &rules()).is_empty());

    profile.monthly_debt = 7_001.0;
    let violations = check_requirements(&profile, &rules());
    assert_eq!(violations.len(), 1);
    assert!(violations[0].summary().starts_with("excessive debt-to-income ratio"));
}
