//! Streaming chat relay endpoint.
//!
//! POST /api/v1/chat/stream
//!
//! The master-agent flow: authenticate, classify the latest user message,
//! compose the stage prompt, open the upstream completion stream, and relay
//! its body to the caller as an untouched `text/event-stream`.
//!
//! Persistence happens at exactly two points, both fire-and-forget: the raw
//! user message is stored before the upstream call, and the accumulated
//! assistant text after the stream completes. To get the accumulated text
//! without re-encoding the relay, the outgoing bytes are teed through the
//! core SSE decoder while passing through verbatim.

use axum::body::Body;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures_util::StreamExt;
use serde::Deserialize;
use uuid::Uuid;

use silk_core::sse::{FrameEvent, SseDecoder};
use silk_types::gateway::GatewayError;
use silk_types::message::{ChatMessage, MessageRole};

use crate::http::error::AppError;
use crate::http::extractors::auth::Authenticated;
use crate::state::AppState;

/// Request body for the streaming chat endpoint.
#[derive(Debug, Deserialize)]
pub struct ChatStreamRequest {
    /// Full conversation history, latest message last.
    pub messages: Vec<ChatMessage>,
    /// Conversation to log the exchange under; when absent, nothing is
    /// persisted and the exchange is still served.
    #[serde(default)]
    pub conversation_id: Option<Uuid>,
}

/// POST /api/v1/chat/stream -- relay one streamed assistant reply.
pub async fn stream_chat(
    State(state): State<AppState>,
    _auth: Authenticated,
    Json(body): Json<ChatStreamRequest>,
) -> Result<Response, AppError> {
    let Some(gateway) = state.gateway.clone() else {
        tracing::error!("chat relay refused: gateway credential missing");
        return Err(AppError::Gateway(GatewayError::MissingCredential));
    };

    // Store the raw user message before initiating the upstream call.
    if let Some(conversation_id) = body.conversation_id {
        if let Some(user_message) = body
            .messages
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::User)
        {
            if let Err(err) = state
                .conversations
                .save_user_message(conversation_id, user_message.content.clone())
                .await
            {
                tracing::warn!(error = %err, "failed to store user message");
            }
        }
    }

    let upstream = gateway.stream_reply(&body.messages).await?;

    let conversations = state.conversations.clone();
    let conversation_id = body.conversation_id;

    let relay = async_stream::stream! {
        let mut upstream = upstream;
        let mut decoder = SseDecoder::new();
        let mut accumulated = String::new();
        let mut failed = false;

        while let Some(chunk) = upstream.next().await {
            match chunk {
                Ok(bytes) => {
                    if !decoder.is_done() {
                        for event in decoder.feed(&bytes) {
                            if let FrameEvent::Delta(fragment) = event {
                                accumulated.push_str(&fragment);
                            }
                        }
                    }
                    yield Ok::<_, GatewayError>(bytes);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "relay read failed mid-stream");
                    failed = true;
                    yield Err(err);
                    break;
                }
            }
        }

        // Store the fully accumulated assistant message; never aborts the
        // exchange the caller already saw.
        if !failed && !accumulated.is_empty() {
            if let Some(conversation_id) = conversation_id {
                if let Err(err) = conversations
                    .save_assistant_message(conversation_id, accumulated)
                    .await
                {
                    tracing::warn!(error = %err, "failed to store assistant message");
                }
            }
        }
    };

    let response = (
        [(header::CONTENT_TYPE, "text/event-stream")],
        Body::from_stream(relay),
    )
        .into_response();

    Ok(response)
}
