//! EMI amortization math.
//!
//! Standard amortization formula: `EMI = P*R*(1+R)^N / ((1+R)^N - 1)` with
//! monthly rate `R` and tenure `N` in months. Outputs are rounded to whole
//! rupees independently of each other, so a schedule's totals are rounded
//! from the unrounded monthly figure rather than recomputed from the
//! rounded EMI.

use thiserror::Error;

use silk_types::loan::{LoanQuote, LoanSchedule};

/// Annual interest rate applied when the request omits one.
pub const DEFAULT_INTEREST_RATE: f64 = 10.5;

/// Tenure applied when the request omits one.
pub const DEFAULT_TENURE_MONTHS: u32 = 36;

/// Alternative tenures offered alongside every quote.
const TENURE_OPTIONS: [u32; 4] = [24, 36, 48, 60];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoanError {
    #[error("invalid loan amount")]
    InvalidAmount,

    #[error("invalid tenure")]
    InvalidTenure,
}

fn monthly_emi(principal: f64, annual_rate: f64, tenure_months: u32) -> f64 {
    let r = annual_rate / 12.0 / 100.0;
    let n = tenure_months as i32;
    if r == 0.0 {
        return principal / tenure_months as f64;
    }
    principal * r * (1.0 + r).powi(n) / ((1.0 + r).powi(n) - 1.0)
}

/// One repayment quote at a fixed tenure.
pub fn quote(principal: f64, annual_rate: f64, tenure_months: u32) -> LoanQuote {
    let emi = monthly_emi(principal, annual_rate, tenure_months);
    let total = emi * tenure_months as f64;

    LoanQuote {
        tenure: tenure_months,
        emi: emi.round() as i64,
        total_payment: total.round() as i64,
        total_interest: (total - principal).round() as i64,
        interest_rate: annual_rate,
    }
}

/// Full calculator answer: the requested tenure plus the option grid.
///
/// Rejects non-positive or non-finite principals and zero tenures before
/// any arithmetic runs.
pub fn schedule(
    principal: f64,
    annual_rate: f64,
    tenure_months: u32,
) -> Result<LoanSchedule, LoanError> {
    if !principal.is_finite() || principal <= 0.0 {
        return Err(LoanError::InvalidAmount);
    }
    if tenure_months == 0 {
        return Err(LoanError::InvalidTenure);
    }

    let requested = quote(principal, annual_rate, tenure_months);
    let options = TENURE_OPTIONS
        .iter()
        .map(|&tenure| quote(principal, annual_rate, tenure))
        .collect();

    Ok(LoanSchedule {
        requested_emi: requested.emi,
        total_payment: requested.total_payment,
        total_interest: requested.total_interest,
        options,
    })
}
