use std::fmt;

use serde::{Deserialize, Serialize};

/// Discrete risk classification, ordered by ascending creditworthiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "REJECTED")]
    Rejected,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "BB")]
    Bb,
    #[serde(rename = "BBB")]
    Bbb,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "AA")]
    Aa,
    #[serde(rename = "AAA")]
    Aaa,
}

impl Tier {
    /// Tiers that can carry an offer, best first.
    pub const APPROVABLE: [Tier; 6] = [Tier::Aaa, Tier::Aa, Tier::A, Tier::Bbb, Tier::Bb, Tier::B];

    pub const fn label(self) -> &'static str {
        match self {
            Tier::Rejected => "REJECTED",
            Tier::B => "B",
            Tier::Bb => "BB",
            Tier::Bbb => "BBB",
            Tier::A => "A",
            Tier::Aa => "AA",
            Tier::Aaa => "AAA",
        }
    }

    pub const fn is_rejected(self) -> bool {
        matches!(self, Tier::Rejected)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Typed applicant snapshot produced by the intake adapter.
///
/// Tenure is always expressed in months; the intake layer converts explicit year fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub name: String,
    pub age: u8,
    pub credit_score: u16,
    pub monthly_income: f64,
    pub monthly_debt: f64,
    pub employment_tenure_months: u32,
    pub requested_amount: Option<f64>,
    pub purpose: String,
}

impl ApplicantProfile {
    pub fn debt_to_income_ratio(&self) -> f64 {
        debt_to_income_ratio(self.monthly_debt, self.monthly_income)
    }
}

/// Monthly debt over monthly income. Zero or negative income counts as maximal risk (1.0).
pub fn debt_to_income_ratio(monthly_debt: f64, monthly_income: f64) -> f64 {
    if monthly_income > 0.0 {
        monthly_debt / monthly_income
    } else {
        1.0
    }
}
