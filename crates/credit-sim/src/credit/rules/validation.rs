use std::fmt;

use super::RuleSet;

/// Single consistency check outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleCheck {
    pub passed: bool,
    pub detail: String,
}

impl RuleCheck {
    fn pass(detail: impl Into<String>) -> Self {
        Self {
            passed: true,
            detail: detail.into(),
        }
    }

    fn fail(detail: impl Into<String>) -> Self {
        Self {
            passed: false,
            detail: detail.into(),
        }
    }

    fn from_bool(passed: bool, ok: String, failed: String) -> Self {
        if passed {
            Self::pass(ok)
        } else {
            Self::fail(failed)
        }
    }

    pub fn line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RuleCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.passed { "✓" } else { "❌" };
        write!(f, "{mark} {}", self.detail)
    }
}

pub(super) fn check_rules(rules: &RuleSet) -> Vec<RuleCheck> {
    let mut checks = Vec::new();

    checks.push(RuleCheck::from_bool(
        rules.min_age < rules.max_age,
        format!("Valid age range ({}-{})", rules.min_age, rules.max_age),
        format!(
            "Invalid age range: min_age {} must be below max_age {}",
            rules.min_age, rules.max_age
        ),
    ));

    let ratio = rules.max_debt_to_income_ratio;
    checks.push(RuleCheck::from_bool(
        ratio > 0.0 && ratio <= 1.0,
        format!("Valid debt-to-income ratio ({ratio:.2})"),
        format!("Invalid debt-to-income ratio {ratio:.2}: must be in (0, 1]"),
    ));

    for (tier, band) in rules.rate_band_by_tier.iter() {
        checks.push(RuleCheck::from_bool(
            band.min < band.max,
            format!("{tier} rates valid ({:.2}%-{:.2}%)", band.min, band.max),
            format!(
                "{tier} rates invalid: min {:.2}% must be below max {:.2}%",
                band.min, band.max
            ),
        ));
    }

    for (tier, band) in rules.term_band_by_tier.iter() {
        checks.push(RuleCheck::from_bool(
            band.min <= band.max && band.max > 0,
            format!("{tier} terms valid ({}-{} months)", band.min, band.max),
            format!(
                "{tier} terms invalid: {}-{} months must be a non-empty range",
                band.min, band.max
            ),
        ));
    }

    let breakpoints_ascending = rules
        .term_breakpoints
        .windows(2)
        .all(|pair| pair[0].max_amount < pair[1].max_amount);
    checks.push(RuleCheck::from_bool(
        breakpoints_ascending,
        "Term breakpoints ascending".to_string(),
        "Term breakpoints must ascend by amount".to_string(),
    ));

    let scoring = &rules.scoring;
    let factors = [
        ("credit score", scoring.credit_score.is_ordered()),
        ("income", scoring.monthly_income.is_ordered()),
        ("tenure", scoring.tenure_months.is_ordered()),
        ("age", scoring.age.is_ordered()),
        ("debt-to-income", scoring.debt_to_income.is_ordered()),
    ];
    for (factor, ordered) in factors {
        checks.push(RuleCheck::from_bool(
            ordered,
            format!("{factor} bands ordered"),
            format!("{factor} bands must cascade from best to worst"),
        ));
    }

    let floors_descending = scoring
        .tier_floors
        .windows(2)
        .all(|pair| pair[0].min_score > pair[1].min_score && pair[0].tier > pair[1].tier);
    checks.push(RuleCheck::from_bool(
        floors_descending,
        "Tier floors descending".to_string(),
        "Tier floors must descend by score and tier".to_string(),
    ));

    let max_score = scoring.max_score();
    checks.push(RuleCheck::from_bool(
        max_score <= 100,
        format!("Maximum attainable score {max_score}"),
        format!("Maximum attainable score {max_score} exceeds 100"),
    ));

    checks
}
