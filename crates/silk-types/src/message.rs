//! Chat message types.
//!
//! A [`ChatMessage`] is the unit of conversation exchanged between the chat
//! client, the relay endpoint, and the upstream gateway. The optional
//! [`MessageMeta`] payload is a closed tagged enum rather than free-form
//! JSON, so every attachment a message can carry is spelled out here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::loan::LoanSchedule;

/// Role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(MessageRole::System),
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// Structured payload attached to a message.
///
/// Tagged so that consumers can match on `kind` instead of probing loose
/// JSON. Absent for plain text messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessageMeta {
    /// An EMI schedule presented alongside the assistant's reply.
    LoanQuote { schedule: LoanSchedule },
    /// A generated sanction letter reference.
    Sanction { reference_no: String },
}

/// A single message in a conversation.
///
/// The last message of a conversation may be mutated in place while it is
/// the streaming target; every earlier message is immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MessageMeta>,
}

impl ChatMessage {
    /// A user message with no metadata.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            metadata: None,
        }
    }

    /// An assistant message with no metadata.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            metadata: None,
        }
    }

    /// A system message with no metadata.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
            metadata: None,
        }
    }
}
