//! Keyword-based intent classifier.
//!
//! Case-insensitive substring containment against fixed keyword sets,
//! evaluated in a fixed priority order; the first matching set wins and
//! there is no scoring or combination logic. Classification looks at the
//! latest user message only -- each turn is classified statelessly.

use silk_types::intent::Intent;

const LOAN_KEYWORDS: &[&str] = &["loan", "borrow", "money"];
const EMI_KEYWORDS: &[&str] = &["emi", "payment", "interest"];
const APPROVAL_KEYWORDS: &[&str] = &["approve", "accept", "yes"];
const EMPATHY_KEYWORDS: &[&str] = &["worried", "scared", "anxious"];

/// Classify a user message into a conversation-stage intent.
///
/// Total over all inputs: anything that matches no keyword set falls back
/// to [`Intent::General`].
pub fn classify(text: &str) -> Intent {
    let lower = text.to_lowercase();
    let matches = |keywords: &[&str]| keywords.iter().any(|kw| lower.contains(kw));

    if matches(LOAN_KEYWORDS) {
        Intent::LoanInquiry
    } else if matches(EMI_KEYWORDS) {
        Intent::EmiNegotiation
    } else if matches(APPROVAL_KEYWORDS) {
        Intent::Approval
    } else if matches(EMPATHY_KEYWORDS) {
        Intent::NeedsEmpathy
    } else {
        Intent::General
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loan_keywords() {
        assert_eq!(classify("I need a loan"), Intent::LoanInquiry);
        assert_eq!(classify("can I borrow some funds"), Intent::LoanInquiry);
        assert_eq!(classify("I need money for a wedding"), Intent::LoanInquiry);
    }

    #[test]
    fn test_emi_keywords() {
        assert_eq!(classify("what would the EMI be"), Intent::EmiNegotiation);
        assert_eq!(classify("the monthly payment seems high"), Intent::EmiNegotiation);
        assert_eq!(classify("what interest rate do you charge"), Intent::EmiNegotiation);
    }

    #[test]
    fn test_approval_keywords() {
        assert_eq!(classify("I approve"), Intent::Approval);
        assert_eq!(classify("ok I accept the offer"), Intent::Approval);
        assert_eq!(classify("yes, let's do it"), Intent::Approval);
    }

    #[test]
    fn test_empathy_keywords() {
        assert_eq!(classify("I'm worried about this"), Intent::NeedsEmpathy);
        assert_eq!(classify("honestly I'm scared"), Intent::NeedsEmpathy);
        assert_eq!(classify("feeling anxious about the process"), Intent::NeedsEmpathy);
    }

    #[test]
    fn test_fallback_is_general() {
        assert_eq!(classify("hello there"), Intent::General);
        assert_eq!(classify(""), Intent::General);
        assert_eq!(classify("¯\\_(ツ)_/¯"), Intent::General);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("I NEED A LOAN"), Intent::LoanInquiry);
        assert_eq!(classify("Emi options?"), Intent::EmiNegotiation);
    }

    #[test]
    fn test_priority_loan_beats_empathy() {
        // Both "worried" and "loan" match; the loan check runs first.
        assert_eq!(classify("I'm worried about the loan"), Intent::LoanInquiry);
    }

    #[test]
    fn test_priority_emi_beats_approval() {
        assert_eq!(classify("yes but the payment is steep"), Intent::EmiNegotiation);
    }

    #[test]
    fn test_substring_containment() {
        // Containment, not word-boundary matching: "yesterday" contains "yes".
        assert_eq!(classify("I called yesterday"), Intent::Approval);
    }
}
