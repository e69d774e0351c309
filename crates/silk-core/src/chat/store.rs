//! Persistence traits for conversations, messages, and profiles.
//!
//! Implementations live in silk-infra (e.g. `SqliteConversationStore`).
//! Uses native async fn in traits (RPITIT, Rust 2024 edition). Callers
//! treat these as fire-and-forget logging around a chat exchange: a store
//! failure is logged, never propagated into the exchange itself.

use silk_types::conversation::{Conversation, MessageRecord};
use silk_types::error::RepositoryError;
use silk_types::profile::CustomerProfile;
use uuid::Uuid;

/// Repository trait for conversation and message persistence.
pub trait ConversationStore: Send + Sync {
    /// Create a new conversation for a user, assigning its id.
    fn create_conversation(
        &self,
        user_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Conversation, RepositoryError>> + Send;

    /// Get a conversation by its unique id.
    fn get_conversation(
        &self,
        conversation_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<Conversation>, RepositoryError>> + Send;

    /// Append a message record to a conversation.
    fn save_message(
        &self,
        record: &MessageRecord,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get messages for a conversation, ordered by created_at ASC.
    fn get_messages(
        &self,
        conversation_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<MessageRecord>, RepositoryError>> + Send;

    /// Mark a conversation approved and sanctioned with the given principal.
    fn mark_sanctioned(
        &self,
        conversation_id: &Uuid,
        loan_amount: f64,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}

/// Repository trait for customer profiles.
pub trait ProfileStore: Send + Sync {
    fn get_profile(
        &self,
        user_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<CustomerProfile>, RepositoryError>> + Send;

    fn save_profile(
        &self,
        profile: &CustomerProfile,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
