//! Credit evaluation engine: rules, eligibility gate, risk scoring, and offer calculation.
//!
//! Every evaluation is a pure function of an [`ApplicantProfile`] and a borrowed
//! [`RuleSet`]; the [`RuleStore`] is the only shared mutable state and swaps whole snapshots.

pub mod domain;
pub mod evaluation;
pub mod intake;
pub mod presets;
pub mod rules;
pub mod view;

#[cfg(test)]
mod tests;

pub use domain::{debt_to_income_ratio, ApplicantProfile, Tier};
pub use evaluation::{
    evaluate, CreditDecision, CreditEvaluator, DeclineReason, EvaluationResult, Installment,
    Offer, RequirementViolation, RiskProfile, ScoreFactor,
};
pub use intake::{parse_profile, read_csv_records, ApplicantRecord, IntakeError, ProfileError};
pub use rules::{
    JsonFileRules, MemoryRules, OverrideError, PersistenceError, RateBand, RuleCheck,
    RulePersistence, RuleSet, RuleStore, TermBand, TermBreakpoint, TierTable,
};
pub use view::{EvaluationView, OfferView, RiskProfileView};
