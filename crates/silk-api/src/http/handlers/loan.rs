//! EMI calculator endpoint.
//!
//! POST /api/v1/loan/quote
//!
//! Unauthenticated: quotes carry no customer data. Interest rate and
//! tenure default to the standard personal-loan terms when omitted.

use axum::Json;
use serde::Deserialize;

use silk_core::loan::emi::{self, LoanError, DEFAULT_INTEREST_RATE, DEFAULT_TENURE_MONTHS};
use silk_types::loan::LoanSchedule;

use crate::http::error::AppError;

#[derive(Debug, Deserialize)]
pub struct LoanQuoteRequest {
    pub loan_amount: f64,
    #[serde(default = "default_rate")]
    pub interest_rate: f64,
    #[serde(default = "default_tenure")]
    pub tenure_months: u32,
}

fn default_rate() -> f64 {
    DEFAULT_INTEREST_RATE
}

fn default_tenure() -> u32 {
    DEFAULT_TENURE_MONTHS
}

/// POST /api/v1/loan/quote -- EMI for the requested terms plus the
/// alternative tenure grid.
pub async fn quote_loan(
    Json(body): Json<LoanQuoteRequest>,
) -> Result<Json<LoanSchedule>, AppError> {
    let schedule = emi::schedule(body.loan_amount, body.interest_rate, body.tenure_months)
        .map_err(|err| match err {
            LoanError::InvalidAmount => AppError::Validation("Invalid loan amount".to_string()),
            LoanError::InvalidTenure => AppError::Validation("Invalid tenure".to_string()),
        })?;

    Ok(Json(schedule))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_quote_with_defaults() {
        let body: LoanQuoteRequest =
            serde_json::from_str(r#"{"loan_amount": 100000}"#).unwrap();
        assert_eq!(body.interest_rate, 10.5);
        assert_eq!(body.tenure_months, 36);

        let Json(schedule) = quote_loan(Json(body)).await.unwrap();
        assert_eq!(schedule.requested_emi, 3250);
        assert_eq!(schedule.options.len(), 4);
    }

    #[tokio::test]
    async fn test_invalid_amount_is_rejected() {
        let body = LoanQuoteRequest {
            loan_amount: 0.0,
            interest_rate: 10.5,
            tenure_months: 36,
        };
        let err = quote_loan(Json(body)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == "Invalid loan amount"));
    }
}
