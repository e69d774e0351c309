//! Conversation-stage intent labels.
//!
//! An [`Intent`] is derived per request from the latest user message and
//! never persisted. It selects which stage block the prompt composer
//! appends to the base system instructions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse classification of the current conversation stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// The customer is asking about a loan, borrowing, or money.
    LoanInquiry,
    /// The customer has concerns about EMI, payments, or interest.
    EmiNegotiation,
    /// The customer is ready to accept the offer.
    Approval,
    /// The customer sounds anxious and needs reassurance.
    NeedsEmpathy,
    /// No stage keyword matched; open-ended engagement.
    General,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::LoanInquiry => write!(f, "loan_inquiry"),
            Intent::EmiNegotiation => write!(f, "emi_negotiation"),
            Intent::Approval => write!(f, "approval"),
            Intent::NeedsEmpathy => write!(f, "needs_empathy"),
            Intent::General => write!(f, "general"),
        }
    }
}

impl FromStr for Intent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "loan_inquiry" => Ok(Intent::LoanInquiry),
            "emi_negotiation" => Ok(Intent::EmiNegotiation),
            "approval" => Ok(Intent::Approval),
            "needs_empathy" => Ok(Intent::NeedsEmpathy),
            "general" => Ok(Intent::General),
            other => Err(format!("invalid intent: '{other}'")),
        }
    }
}

impl Intent {
    /// All intent values, in classifier priority order.
    pub const ALL: [Intent; 5] = [
        Intent::LoanInquiry,
        Intent::EmiNegotiation,
        Intent::Approval,
        Intent::NeedsEmpathy,
        Intent::General,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_roundtrip() {
        for intent in Intent::ALL {
            let s = intent.to_string();
            let parsed: Intent = s.parse().unwrap();
            assert_eq!(intent, parsed);
        }
    }

    #[test]
    fn test_intent_serde() {
        let json = serde_json::to_string(&Intent::EmiNegotiation).unwrap();
        assert_eq!(json, "\"emi_negotiation\"");
        let parsed: Intent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Intent::EmiNegotiation);
    }

    #[test]
    fn test_invalid_intent_rejected() {
        assert!("closing".parse::<Intent>().is_err());
    }
}
