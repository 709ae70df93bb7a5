//! Operator-tunable business rules.
//!
//! A [`RuleSet`] is an immutable value: evaluations borrow it, admin actions build a new one
//! and hand it to the [`RuleStore`], which swaps the shared snapshot.

mod overrides;
mod scoring;
mod store;
mod validation;

pub use overrides::OverrideError;
pub use scoring::{
    AgeBracket, AgeBrackets, AgeRange, Band, BandTable, Cutoff, Fallback, ScoringModel, TierFloor,
};
pub use store::{JsonFileRules, MemoryRules, PersistenceError, RulePersistence, RuleStore};
pub use validation::RuleCheck;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::domain::Tier;

/// Complete set of thresholds, per-tier limits, and scoring bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    pub min_credit_score: u16,
    pub min_age: u8,
    pub max_age: u8,
    pub min_monthly_income: f64,
    pub min_tenure_months: u32,
    pub max_debt_to_income_ratio: f64,
    pub max_amount_by_tier: TierTable<f64>,
    pub rate_band_by_tier: TierTable<RateBand>,
    pub term_band_by_tier: TierTable<TermBand>,
    /// Ascending by `max_amount`; amounts above the last breakpoint use the tier's max term.
    pub term_breakpoints: Vec<TermBreakpoint>,
    pub scoring: ScoringModel,
}

/// Annual interest rate band, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateBand {
    pub min: f64,
    pub max: f64,
}

/// Loan term band, in months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermBand {
    pub min: u32,
    pub max: u32,
}

/// Caps the term for amounts up to `max_amount`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TermBreakpoint {
    pub max_amount: f64,
    pub max_months: u32,
}

/// One value per approvable tier; `REJECTED` has no entry by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierTable<T> {
    #[serde(rename = "AAA")]
    pub aaa: T,
    #[serde(rename = "AA")]
    pub aa: T,
    #[serde(rename = "A")]
    pub a: T,
    #[serde(rename = "BBB")]
    pub bbb: T,
    #[serde(rename = "BB")]
    pub bb: T,
    #[serde(rename = "B")]
    pub b: T,
}

impl<T> TierTable<T> {
    pub fn get(&self, tier: Tier) -> Option<&T> {
        match tier {
            Tier::Aaa => Some(&self.aaa),
            Tier::Aa => Some(&self.aa),
            Tier::A => Some(&self.a),
            Tier::Bbb => Some(&self.bbb),
            Tier::Bb => Some(&self.bb),
            Tier::B => Some(&self.b),
            Tier::Rejected => None,
        }
    }

    pub fn get_mut(&mut self, tier: Tier) -> Option<&mut T> {
        match tier {
            Tier::Aaa => Some(&mut self.aaa),
            Tier::Aa => Some(&mut self.aa),
            Tier::A => Some(&mut self.a),
            Tier::Bbb => Some(&mut self.bbb),
            Tier::Bb => Some(&mut self.bb),
            Tier::B => Some(&mut self.b),
            Tier::Rejected => None,
        }
    }

    /// Entries from `AAA` down to `B`.
    pub fn iter(&self) -> impl Iterator<Item = (Tier, &T)> {
        Tier::APPROVABLE
            .into_iter()
            .filter_map(move |tier| self.get(tier).map(|value| (tier, value)))
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            min_credit_score: 650,
            min_age: 18,
            max_age: 70,
            min_monthly_income: 15_000.0,
            min_tenure_months: 12,
            max_debt_to_income_ratio: 0.35,
            max_amount_by_tier: TierTable {
                aaa: 200_000.0,
                aa: 150_000.0,
                a: 100_000.0,
                bbb: 75_000.0,
                bb: 50_000.0,
                b: 25_000.0,
            },
            rate_band_by_tier: TierTable {
                aaa: RateBand { min: 8.5, max: 12.0 },
                aa: RateBand { min: 12.0, max: 15.0 },
                a: RateBand { min: 15.0, max: 18.0 },
                bbb: RateBand { min: 18.0, max: 22.0 },
                bb: RateBand { min: 22.0, max: 28.0 },
                b: RateBand { min: 28.0, max: 35.0 },
            },
            term_band_by_tier: TierTable {
                aaa: TermBand { min: 12, max: 60 },
                aa: TermBand { min: 12, max: 48 },
                a: TermBand { min: 12, max: 36 },
                bbb: TermBand { min: 12, max: 24 },
                bb: TermBand { min: 6, max: 18 },
                b: TermBand { min: 6, max: 12 },
            },
            term_breakpoints: vec![
                TermBreakpoint {
                    max_amount: 50_000.0,
                    max_months: 24,
                },
                TermBreakpoint {
                    max_amount: 100_000.0,
                    max_months: 36,
                },
            ],
            scoring: ScoringModel::default(),
        }
    }
}

impl RuleSet {
    /// Defaults deep-merged with `overrides`.
    ///
    /// A malformed override document is logged and discarded; the caller always receives a
    /// usable rule set.
    pub fn load(overrides: Option<&Value>) -> RuleSet {
        let defaults = RuleSet::default();
        match overrides {
            None => defaults,
            Some(document) => match defaults.merged(document) {
                Ok(rules) => rules,
                Err(err) => {
                    warn!(error = %err, "ignoring malformed rule overrides; using defaults");
                    defaults
                }
            },
        }
    }

    /// Copy of `self` with `overrides` merged on top.
    pub fn merged(&self, overrides: &Value) -> Result<RuleSet, OverrideError> {
        overrides::merge(self, overrides)
    }

    /// The flat JSON document used for persistence.
    pub fn to_document(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Human-readable pass/fail lines for operator feedback.
    pub fn validate(&self) -> Vec<String> {
        self.checks().iter().map(RuleCheck::line).collect()
    }

    pub fn checks(&self) -> Vec<RuleCheck> {
        validation::check_rules(self)
    }

    pub fn is_consistent(&self) -> bool {
        self.checks().iter().all(|check| check.passed)
    }
}
