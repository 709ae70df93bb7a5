use serde::{Deserialize, Serialize};

/// Rounds a monetary value to cents.
pub fn round_money(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Monthly rate as a fraction, from an annual rate in percent.
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / 12.0
}

/// Level payment of a fixed-rate annuity, unrounded.
///
/// `term_months` of zero is treated as a single period.
pub fn monthly_payment(amount: f64, annual_rate_percent: f64, term_months: u32) -> f64 {
    let periods = term_months.max(1);
    let rate = monthly_rate(annual_rate_percent);
    if rate > 0.0 {
        let growth = (1.0 + rate).powi(periods as i32);
        amount * rate * growth / (growth - 1.0)
    } else {
        amount / f64::from(periods)
    }
}

/// One period of an amortization schedule; money fields are rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    pub period: u32,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    pub balance: f64,
}

/// Projects the level payment forward until the balance is retired.
///
/// The running balance is carried at full precision; only the reported fields are rounded.
pub fn schedule(amount: f64, annual_rate_percent: f64, term_months: u32) -> Vec<Installment> {
    let periods = term_months.max(1);
    let rate = monthly_rate(annual_rate_percent);
    let payment = monthly_payment(amount, annual_rate_percent, periods);

    let mut balance = amount;
    (1..=periods)
        .map(|period| {
            let interest = balance * rate;
            let principal = payment - interest;
            balance -= principal;
            Installment {
                period,
                payment: round_money(payment),
                principal: round_money(principal),
                interest: round_money(interest),
                balance: round_money(balance.max(0.0)),
            }
        })
        .collect()
}
