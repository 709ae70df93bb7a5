use super::super::domain::ApplicantProfile;
use super::super::rules::ScoringModel;
use super::{RiskProfile, ScoreFactor};

/// Scores the five factors in their fixed order and maps the total to a tier.
pub fn score(profile: &ApplicantProfile, model: &ScoringModel) -> RiskProfile {
    let ratio = profile.debt_to_income_ratio();

    let awards = [
        model.credit_score.award(f64::from(profile.credit_score)),
        model.monthly_income.award(profile.monthly_income),
        model
            .tenure_months
            .award(f64::from(profile.employment_tenure_months)),
        model.age.award(profile.age),
        model.debt_to_income.award(ratio),
    ];

    let factors: Vec<ScoreFactor> = awards
        .iter()
        .map(|(label, points)| ScoreFactor {
            label: (*label).to_string(),
            points: *points,
        })
        .collect();

    let total = factors
        .iter()
        .fold(0u16, |total, factor| total.saturating_add(factor.points))
        .min(100);

    RiskProfile {
        tier: model.tier_for(total),
        score: total,
        factors,
        debt_to_income_ratio: ratio,
    }
}
