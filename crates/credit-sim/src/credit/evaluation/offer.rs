use serde::{Deserialize, Serialize};

use super::super::domain::Tier;
use super::super::rules::{RateBand, RuleSet, TermBand};
use super::amortization::{self, round_money, Installment};
use super::RiskProfile;

/// Concrete amortizing loan offer. Money and rate fields are rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub tier: Tier,
    pub amount: f64,
    /// Annual rate in percent.
    pub annual_rate: f64,
    pub term_months: u32,
    pub monthly_payment: f64,
    pub total_paid: f64,
    pub total_interest: f64,
    /// Unrounded rate the payment was computed from.
    #[serde(skip)]
    exact_rate: Option<f64>,
}

impl Offer {
    /// Projects the offer month by month at the rate its payment was priced with.
    pub fn schedule(&self) -> Vec<Installment> {
        let rate = self.exact_rate.unwrap_or(self.annual_rate);
        amortization::schedule(self.amount, rate, self.term_months)
    }
}

/// Builds the offer for a scored applicant; `None` when the tier is `REJECTED`.
pub fn offer(risk: &RiskProfile, requested_amount: Option<f64>, rules: &RuleSet) -> Option<Offer> {
    let tier = risk.tier;
    let max_amount = *rules.max_amount_by_tier.get(tier)?;
    let rate_band = rules.rate_band_by_tier.get(tier)?;
    let term_band = rules.term_band_by_tier.get(tier)?;

    let amount = round_money(approved_amount(requested_amount, max_amount));
    let annual_rate = interpolate_rate(risk.score, rate_band);
    let term_months = select_term(amount, term_band, rules);

    // Full precision until the boundary; interest derives from the rounded totals so
    // `total_interest == total_paid - amount` holds exactly.
    let payment = amortization::monthly_payment(amount, annual_rate, term_months);
    let total_paid = round_money(payment * f64::from(term_months));
    let total_interest = round_money(total_paid - amount);

    Some(Offer {
        tier,
        amount,
        annual_rate: round_money(annual_rate),
        term_months,
        monthly_payment: round_money(payment),
        total_paid,
        total_interest,
        exact_rate: Some(annual_rate),
    })
}

/// Requested amount capped at the tier ceiling; non-positive or absent requests get the ceiling.
pub fn approved_amount(requested_amount: Option<f64>, max_amount: f64) -> f64 {
    match requested_amount {
        Some(requested) if requested > 0.0 => requested.min(max_amount),
        _ => max_amount,
    }
}

/// Higher scores land closer to the band's minimum rate.
pub fn interpolate_rate(score: u16, band: &RateBand) -> f64 {
    let normalized = f64::from(score) / 100.0;
    let rate = band.max - normalized * (band.max - band.min);
    rate.max(band.min).min(band.max)
}

/// Term capped by the first amount breakpoint covering `amount`, kept inside the tier band.
pub fn select_term(amount: f64, band: &TermBand, rules: &RuleSet) -> u32 {
    let capped = rules
        .term_breakpoints
        .iter()
        .find(|breakpoint| amount <= breakpoint.max_amount)
        .map(|breakpoint| breakpoint.max_months.min(band.max))
        .unwrap_or(band.max);

    capped.max(band.min).min(band.max).max(1)
}
