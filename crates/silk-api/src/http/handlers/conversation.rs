//! Conversation creation endpoint.
//!
//! POST /api/v1/conversations
//!
//! The chat client calls this once at startup; the returned id is echoed
//! back on every relay request so the exchange gets logged. A client that
//! skips this (or fails here) still chats -- nothing is persisted then.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::http::error::AppError;
use crate::http::extractors::auth::Authenticated;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ConversationResponse {
    pub id: Uuid,
}

/// POST /api/v1/conversations -- start a persisted conversation.
pub async fn create_conversation(
    State(state): State<AppState>,
    auth: Authenticated,
) -> Result<Json<ConversationResponse>, AppError> {
    let conversation = state.conversations.create_conversation(&auth.user_id).await?;
    Ok(Json(ConversationResponse {
        id: conversation.id,
    }))
}
