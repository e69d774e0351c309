//! Conversation service orchestrating record construction and persistence.
//!
//! Generic over [`ConversationStore`] so silk-core never depends on
//! silk-infra. The service builds the records (ids, timestamps) and leaves
//! fire-and-forget discipline to the call sites.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use silk_types::conversation::{Conversation, MessageRecord};
use silk_types::error::RepositoryError;
use silk_types::message::MessageRole;

use crate::chat::store::ConversationStore;

/// Persistence orchestration for conversations and their messages.
pub struct ConversationService<C: ConversationStore> {
    store: C,
}

impl<C: ConversationStore> ConversationService<C> {
    pub fn new(store: C) -> Self {
        Self { store }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &C {
        &self.store
    }

    /// Create a new conversation for a user.
    pub async fn create_conversation(
        &self,
        user_id: &Uuid,
    ) -> Result<Conversation, RepositoryError> {
        let conversation = self.store.create_conversation(user_id).await?;
        info!(conversation_id = %conversation.id, "conversation created");
        Ok(conversation)
    }

    /// Store a raw user message.
    pub async fn save_user_message(
        &self,
        conversation_id: Uuid,
        content: String,
    ) -> Result<MessageRecord, RepositoryError> {
        self.save(conversation_id, MessageRole::User, content).await
    }

    /// Store a fully accumulated assistant message.
    pub async fn save_assistant_message(
        &self,
        conversation_id: Uuid,
        content: String,
    ) -> Result<MessageRecord, RepositoryError> {
        self.save(conversation_id, MessageRole::Assistant, content)
            .await
    }

    /// Mark a conversation approved and sanctioned.
    pub async fn mark_sanctioned(
        &self,
        conversation_id: &Uuid,
        loan_amount: f64,
    ) -> Result<(), RepositoryError> {
        self.store
            .mark_sanctioned(conversation_id, loan_amount)
            .await?;
        info!(conversation_id = %conversation_id, loan_amount, "conversation sanctioned");
        Ok(())
    }

    async fn save(
        &self,
        conversation_id: Uuid,
        role: MessageRole,
        content: String,
    ) -> Result<MessageRecord, RepositoryError> {
        let record = MessageRecord {
            id: Uuid::now_v7(),
            conversation_id,
            role,
            content,
            created_at: Utc::now(),
        };
        self.store.save_message(&record).await?;
        Ok(record)
    }
}
