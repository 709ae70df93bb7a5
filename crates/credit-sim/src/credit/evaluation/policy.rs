use serde::{Deserialize, Serialize};

use super::offer::Offer;

/// Failed hard requirement, carrying the values needed for an adverse action notice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RequirementViolation {
    CreditScoreBelowMinimum {
        actual: u16,
        minimum: u16,
    },
    AgeOutOfRange {
        actual: u8,
        min: u8,
        max: u8,
    },
    InsufficientIncome {
        actual: f64,
        minimum: f64,
    },
    InsufficientTenure {
        actual_months: u32,
        minimum_months: u32,
    },
    ExcessiveDebtToIncome {
        actual_ratio: f64,
        maximum_ratio: f64,
    },
}

impl RequirementViolation {
    pub fn summary(&self) -> String {
        match self {
            RequirementViolation::CreditScoreBelowMinimum { actual, minimum } => {
                format!("insufficient credit score: {actual} < {minimum}")
            }
            RequirementViolation::AgeOutOfRange { actual, min, max } => {
                format!("age out of range: {actual} (allowed {min}-{max})")
            }
            RequirementViolation::InsufficientIncome { actual, minimum } => {
                format!("insufficient income: ${actual:.0} < ${minimum:.0}")
            }
            RequirementViolation::InsufficientTenure {
                actual_months,
                minimum_months,
            } => format!(
                "insufficient employment tenure: {actual_months} months < {minimum_months} months"
            ),
            RequirementViolation::ExcessiveDebtToIncome {
                actual_ratio,
                maximum_ratio,
            } => format!(
                "excessive debt-to-income ratio: {:.2}% > {:.2}%",
                actual_ratio * 100.0,
                maximum_ratio * 100.0
            ),
        }
    }
}

/// Why an application did not receive an offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DeclineReason {
    /// Hard gate failure; the scorer never ran.
    BasicRequirements(Vec<RequirementViolation>),
    /// Passed the gate but scored below the lowest tier floor.
    HighRisk,
    /// The applicant record could not be read.
    InvalidInput(String),
}

impl DeclineReason {
    pub fn summary(&self) -> String {
        match self {
            DeclineReason::BasicRequirements(_) => "does not meet basic requirements".to_string(),
            DeclineReason::HighRisk => "risk profile too high".to_string(),
            DeclineReason::InvalidInput(detail) => {
                format!("incomplete or invalid data: {detail}")
            }
        }
    }

    pub fn violations(&self) -> &[RequirementViolation] {
        match self {
            DeclineReason::BasicRequirements(violations) => violations,
            _ => &[],
        }
    }
}

/// Final credit decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CreditDecision {
    Approved(Offer),
    Declined(DeclineReason),
}

impl CreditDecision {
    pub fn summary(&self) -> String {
        match self {
            CreditDecision::Approved(offer) => format!(
                "approved: {:.2} at {:.2}% over {} months",
                offer.amount, offer.annual_rate, offer.term_months
            ),
            CreditDecision::Declined(reason) => format!("declined: {}", reason.summary()),
        }
    }
}
