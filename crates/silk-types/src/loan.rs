//! Loan, EMI, and sanction-letter domain types.

use serde::{Deserialize, Serialize};

/// One repayment option at a fixed tenure.
///
/// Monetary amounts are rounded to whole rupees; the unrounded schedule is
/// an implementation detail of the calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanQuote {
    /// Repayment period in months.
    pub tenure: u32,
    /// Equated monthly installment.
    pub emi: i64,
    /// Total amount repaid over the tenure.
    pub total_payment: i64,
    /// Interest component of the total payment.
    pub total_interest: i64,
    /// Annual interest rate in percent.
    pub interest_rate: f64,
}

/// The calculator's full answer: the requested tenure plus a grid of
/// alternative tenure options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanSchedule {
    pub requested_emi: i64,
    pub total_payment: i64,
    pub total_interest: i64,
    pub options: Vec<LoanQuote>,
}

/// Terms of an approved loan, as rendered into the sanction letter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanctionTerms {
    pub loan_amount: f64,
    pub interest_rate: f64,
    pub tenure: u32,
    pub emi: i64,
}

impl SanctionTerms {
    /// Processing fee charged at disbursal: 2% of the sanctioned amount.
    pub fn processing_fee(&self) -> i64 {
        (self.loan_amount * 0.02).round() as i64
    }
}

/// A rendered sanction letter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanctionLetter {
    pub reference_no: String,
    pub html: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processing_fee_is_two_percent() {
        let terms = SanctionTerms {
            loan_amount: 100_000.0,
            interest_rate: 10.5,
            tenure: 36,
            emi: 3250,
        };
        assert_eq!(terms.processing_fee(), 2000);
    }

    #[test]
    fn test_loan_schedule_serde() {
        let schedule = LoanSchedule {
            requested_emi: 3250,
            total_payment: 117_009,
            total_interest: 17_009,
            options: vec![LoanQuote {
                tenure: 36,
                emi: 3250,
                total_payment: 117_009,
                total_interest: 17_009,
                interest_rate: 10.5,
            }],
        };
        let json = serde_json::to_string(&schedule).unwrap();
        assert!(json.contains("\"requested_emi\":3250"));
        let parsed: LoanSchedule = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.options.len(), 1);
        assert_eq!(parsed.options[0].tenure, 36);
    }
}
