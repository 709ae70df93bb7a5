pub mod amortization;
mod gate;
mod offer;
mod policy;
mod scoring;

pub use amortization::Installment;
pub use gate::check as check_requirements;
pub use offer::{approved_amount, interpolate_rate, offer as compute_offer, select_term, Offer};
pub use policy::{CreditDecision, DeclineReason, RequirementViolation};
pub use scoring::score as score_profile;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::domain::{ApplicantProfile, Tier};
use super::intake::{self, ApplicantRecord};
use super::rules::RuleSet;

/// Stateless evaluator bound to one rule snapshot.
#[derive(Debug, Clone)]
pub struct CreditEvaluator {
    rules: Arc<RuleSet>,
}

impl CreditEvaluator {
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn evaluate(&self, profile: &ApplicantProfile) -> EvaluationResult {
        evaluate(profile, &self.rules)
    }

    /// Parses a loose key-value record first; unreadable records are declined, not raised.
    pub fn evaluate_record(&self, record: &ApplicantRecord) -> EvaluationResult {
        match intake::parse_profile(record) {
            Ok(profile) => self.evaluate(&profile),
            Err(err) => {
                debug!(error = %err, "applicant record rejected at intake");
                EvaluationResult::declined(DeclineReason::InvalidInput(err.to_string()), None)
            }
        }
    }

    pub fn evaluate_value(&self, value: &Value) -> EvaluationResult {
        match value.as_object() {
            Some(record) => self.evaluate_record(record),
            None => EvaluationResult::declined(
                DeclineReason::InvalidInput("applicant record must be a JSON object".to_string()),
                None,
            ),
        }
    }
}

/// Gate, then score, then offer.
pub fn evaluate(profile: &ApplicantProfile, rules: &RuleSet) -> EvaluationResult {
    let violations = gate::check(profile, rules);
    if !violations.is_empty() {
        debug!(count = violations.len(), "applicant failed basic requirements");
        return EvaluationResult::declined(DeclineReason::BasicRequirements(violations), None);
    }

    let risk = scoring::score(profile, &rules.scoring);
    match offer::offer(&risk, profile.requested_amount, rules) {
        Some(offer) => {
            debug!(tier = %risk.tier, score = risk.score, "offer computed");
            EvaluationResult {
                decision: CreditDecision::Approved(offer),
                risk: Some(risk),
            }
        }
        None => {
            debug!(score = risk.score, "risk profile below lowest tier floor");
            EvaluationResult::declined(DeclineReason::HighRisk, Some(risk))
        }
    }
}

/// Points awarded by one scoring factor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreFactor {
    pub label: String,
    pub points: u16,
}

/// Composite score, tier, and the factor trail behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskProfile {
    pub tier: Tier,
    pub score: u16,
    pub factors: Vec<ScoreFactor>,
    pub debt_to_income_ratio: f64,
}

/// Result of one evaluation, owned by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub decision: CreditDecision,
    /// Present whenever the scorer ran: approvals and high-risk declines.
    pub risk: Option<RiskProfile>,
}

impl EvaluationResult {
    fn declined(reason: DeclineReason, risk: Option<RiskProfile>) -> Self {
        Self {
            decision: CreditDecision::Declined(reason),
            risk,
        }
    }

    pub fn approved(&self) -> bool {
        matches!(self.decision, CreditDecision::Approved(_))
    }

    pub fn offer(&self) -> Option<&Offer> {
        match &self.decision {
            CreditDecision::Approved(offer) => Some(offer),
            CreditDecision::Declined(_) => None,
        }
    }

    pub fn decline_reason(&self) -> Option<&DeclineReason> {
        match &self.decision {
            CreditDecision::Approved(_) => None,
            CreditDecision::Declined(reason) => Some(reason),
        }
    }

    /// Tier assigned by the scorer; `REJECTED` when the scorer never ran.
    pub fn tier(&self) -> Tier {
        self.risk
            .as_ref()
            .map(|risk| risk.tier)
            .unwrap_or(Tier::Rejected)
    }

    pub fn score(&self) -> Option<u16> {
        self.risk.as_ref().map(|risk| risk.score)
    }
}
