//! Upstream chat-completion gateway wire types and error taxonomy.
//!
//! The gateway speaks the OpenAI chat-completions protocol: a JSON request
//! with `stream: true` answered by a `text/event-stream` body whose `data:`
//! frames each carry one [`ChatCompletionChunk`], terminated by the literal
//! sentinel `[DONE]`.

use serde::{Deserialize, Serialize};

use crate::message::ChatMessage;

/// Sentinel payload marking the logical end of a completion stream.
pub const DONE_SENTINEL: &str = "[DONE]";

/// Outbound request to the gateway's `/chat/completions` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
}

/// One streamed completion chunk, as carried by a single SSE `data:` frame.
///
/// Every field defaults so that frames with unexpected shapes decode to an
/// empty chunk instead of failing the whole stream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatCompletionChunk {
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
}

/// A single choice within a streamed chunk.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChunkChoice {
    #[serde(default)]
    pub delta: ChunkDelta,
}

/// The incremental delta of a choice. `content` carries the text fragment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChunkDelta {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionChunk {
    /// Extract the text fragment at `choices[0].delta.content`, if any.
    ///
    /// Returns `None` for empty fragments so callers never merge a no-op.
    pub fn text_fragment(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.delta.content.as_deref())
            .filter(|s| !s.is_empty())
    }
}

/// Errors from the upstream streaming proxy.
///
/// Exactly one of these is produced per failed exchange. Frame-level parse
/// failures are not represented here: they are recovered inside the decoder
/// and never surface past a log line.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The upstream credential is not configured. Detected before any
    /// network call is made.
    #[error("gateway credential is not configured")]
    MissingCredential,

    /// Upstream returned 429.
    #[error("upstream rate limit exceeded")]
    RateLimited,

    /// Upstream returned 402.
    #[error("upstream payment or quota required")]
    QuotaExceeded,

    /// Any other non-success upstream status. The body is logged by the
    /// producer, not shown to end users.
    #[error("upstream failure (HTTP {status})")]
    Upstream { status: u16, body: String },

    /// The request or the stream read itself failed.
    #[error("transport error: {0}")]
    Transport(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_text_fragment() {
        let chunk: ChatCompletionChunk =
            serde_json::from_str(r#"{"choices":[{"delta":{"content":"Hel"}}]}"#).unwrap();
        assert_eq!(chunk.text_fragment(), Some("Hel"));
    }

    #[test]
    fn test_chunk_without_content_is_none() {
        let chunk: ChatCompletionChunk =
            serde_json::from_str(r#"{"choices":[{"delta":{}}]}"#).unwrap();
        assert_eq!(chunk.text_fragment(), None);
    }

    #[test]
    fn test_chunk_empty_fragment_is_none() {
        let chunk: ChatCompletionChunk =
            serde_json::from_str(r#"{"choices":[{"delta":{"content":""}}]}"#).unwrap();
        assert_eq!(chunk.text_fragment(), None);
    }

    #[test]
    fn test_chunk_with_no_choices_is_none() {
        let chunk: ChatCompletionChunk = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert_eq!(chunk.text_fragment(), None);

        // Unknown shapes decode to the default rather than erroring.
        let chunk: ChatCompletionChunk = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(chunk.text_fragment(), None);
    }

    #[test]
    fn test_request_serializes_stream_flag() {
        let req = ChatCompletionRequest {
            model: "google/gemini-2.5-flash".to_string(),
            messages: vec![crate::message::ChatMessage::user("hi")],
            stream: true,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"stream\":true"));
        assert!(json.contains("\"role\":\"user\""));
    }

    #[test]
    fn test_gateway_error_display() {
        let err = GatewayError::Upstream {
            status: 503,
            body: "service unavailable".to_string(),
        };
        assert!(err.to_string().contains("503"));
        assert!(!err.to_string().contains("service unavailable"));
    }
}
