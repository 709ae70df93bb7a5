use super::super::domain::ApplicantProfile;
use super::super::rules::RuleSet;
use super::policy::RequirementViolation;

/// Applies every hard requirement and reports all failures, not just the first.
pub fn check(profile: &ApplicantProfile, rules: &RuleSet) -> Vec<RequirementViolation> {
    let mut violations = Vec::new();

    if profile.credit_score < rules.min_credit_score {
        violations.push(RequirementViolation::CreditScoreBelowMinimum {
            actual: profile.credit_score,
            minimum: rules.min_credit_score,
        });
    }

    if !(rules.min_age..=rules.max_age).contains(&profile.age) {
        violations.push(RequirementViolation::AgeOutOfRange {
            actual: profile.age,
            min: rules.min_age,
            max: rules.max_age,
        });
    }

    if profile.monthly_income < rules.min_monthly_income {
        violations.push(RequirementViolation::InsufficientIncome {
            actual: profile.monthly_income,
            minimum: rules.min_monthly_income,
        });
    }

    if profile.employment_tenure_months < rules.min_tenure_months {
        violations.push(RequirementViolation::InsufficientTenure {
            actual_months: profile.employment_tenure_months,
            minimum_months: rules.min_tenure_months,
        });
    }

    let ratio = profile.debt_to_income_ratio();
    if ratio > rules.max_debt_to_income_ratio {
        violations.push(RequirementViolation::ExcessiveDebtToIncome {
            actual_ratio: ratio,
            maximum_ratio: rules.max_debt_to_income_ratio,
        });
    }

    violations
}
