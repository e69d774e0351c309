//! Persisted conversation and message records.
//!
//! These mirror the `conversations` and `messages` tables. The chat relay
//! treats the store as fire-and-forget logging: records are written around
//! an exchange but never gate it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::message::MessageRole;

/// Approval state of a conversation's loan offer.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (approval_status IN ('pending', 'approved'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApprovalStatus::Pending => write!(f, "pending"),
            ApprovalStatus::Approved => write!(f, "approved"),
        }
    }
}

impl FromStr for ApprovalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ApprovalStatus::Pending),
            "approved" => Ok(ApprovalStatus::Approved),
            other => Err(format!("invalid approval status: '{other}'")),
        }
    }
}

impl Default for ApprovalStatus {
    fn default() -> Self {
        ApprovalStatus::Pending
    }
}

/// Disbursal state of a conversation's loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    InProgress,
    Sanctioned,
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoanStatus::InProgress => write!(f, "in_progress"),
            LoanStatus::Sanctioned => write!(f, "sanctioned"),
        }
    }
}

impl FromStr for LoanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in_progress" => Ok(LoanStatus::InProgress),
            "sanctioned" => Ok(LoanStatus::Sanctioned),
            other => Err(format!("invalid loan status: '{other}'")),
        }
    }
}

impl Default for LoanStatus {
    fn default() -> Self {
        LoanStatus::InProgress
    }
}

/// A persisted conversation between a customer and the assistant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub approval_status: ApprovalStatus,
    pub loan_status: LoanStatus,
    /// Sanctioned principal, set once the offer is approved.
    pub loan_amount: Option<f64>,
}

/// A persisted message within a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approval_status_roundtrip() {
        for status in [ApprovalStatus::Pending, ApprovalStatus::Approved] {
            let s = status.to_string();
            let parsed: ApprovalStatus = s.parse().unwrap();
            assert_eq!(status, parsed);
        }
    }

    #[test]
    fn test_loan_status_roundtrip() {
        for status in [LoanStatus::InProgress, LoanStatus::Sanctioned] {
            let s = status.to_string();
            let parsed: LoanStatus = s.parse().unwrap();
            assert_eq!(status, parsed);
        }
    }

    #[test]
    fn test_status_defaults() {
        assert_eq!(ApprovalStatus::default(), ApprovalStatus::Pending);
        assert_eq!(LoanStatus::default(), LoanStatus::InProgress);
    }

    #[test]
    fn test_conversation_serialize() {
        let conversation = Conversation {
            id: Uuid::now_v7(),
            user_id: Uuid::now_v7(),
            started_at: Utc::now(),
            approval_status: ApprovalStatus::Approved,
            loan_status: LoanStatus::Sanctioned,
            loan_amount: Some(100_000.0),
        };
        let json = serde_json::to_string(&conversation).unwrap();
        assert!(json.contains("\"approval_status\":\"approved\""));
        assert!(json.contains("\"loan_status\":\"sanctioned\""));
    }
}
