//! SQLite conversation store implementation.
//!
//! Implements `ConversationStore` from `silk-core` using sqlx with split
//! read/write pools: raw queries, private Row structs, reader for SELECTs
//! and writer for mutations.

use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

use silk_core::chat::store::ConversationStore;
use silk_types::conversation::{ApprovalStatus, Conversation, LoanStatus, MessageRecord};
use silk_types::error::RepositoryError;
use silk_types::message::MessageRole;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ConversationStore`.
pub struct SqliteConversationStore {
    pool: DatabasePool,
}

impl SqliteConversationStore {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Conversation.
struct ConversationRow {
    id: String,
    user_id: String,
    started_at: String,
    approval_status: String,
    loan_status: String,
    loan_amount: Option<f64>,
}

impl ConversationRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            started_at: row.try_get("started_at")?,
            approval_status: row.try_get("approval_status")?,
            loan_status: row.try_get("loan_status")?,
            loan_amount: row.try_get("loan_amount")?,
        })
    }

    fn into_conversation(self) -> Result<Conversation, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid conversation id: {e}")))?;
        let user_id = Uuid::parse_str(&self.user_id)
            .map_err(|e| RepositoryError::Query(format!("invalid user_id: {e}")))?;
        let started_at = parse_datetime(&self.started_at)?;
        let approval_status: ApprovalStatus = self
            .approval_status
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;
        let loan_status: LoanStatus = self
            .loan_status
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;

        Ok(Conversation {
            id,
            user_id,
            started_at,
            approval_status,
            loan_status,
            loan_amount: self.loan_amount,
        })
    }
}

/// Internal row type for mapping SQLite rows to domain MessageRecord.
struct MessageRow {
    id: String,
    conversation_id: String,
    role: String,
    content: String,
    created_at: String,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            conversation_id: row.try_get("conversation_id")?,
            role: row.try_get("role")?,
            content: row.try_get("content")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_record(self) -> Result<MessageRecord, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid message id: {e}")))?;
        let conversation_id = Uuid::parse_str(&self.conversation_id)
            .map_err(|e| RepositoryError::Query(format!("invalid conversation_id: {e}")))?;
        let role: MessageRole = self
            .role
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(MessageRecord {
            id,
            conversation_id,
            role,
            content: self.content,
            created_at,
        })
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid timestamp '{s}': {e}")))
}

impl ConversationStore for SqliteConversationStore {
    async fn create_conversation(&self, user_id: &Uuid) -> Result<Conversation, RepositoryError> {
        let conversation = Conversation {
            id: Uuid::now_v7(),
            user_id: *user_id,
            started_at: Utc::now(),
            approval_status: ApprovalStatus::default(),
            loan_status: LoanStatus::default(),
            loan_amount: None,
        };

        sqlx::query(
            "INSERT INTO conversations (id, user_id, started_at, approval_status, loan_status, loan_amount)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(conversation.id.to_string())
        .bind(conversation.user_id.to_string())
        .bind(conversation.started_at.to_rfc3339())
        .bind(conversation.approval_status.to_string())
        .bind(conversation.loan_status.to_string())
        .bind(conversation.loan_amount)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(conversation)
    }

    async fn get_conversation(
        &self,
        conversation_id: &Uuid,
    ) -> Result<Option<Conversation>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM conversations WHERE id = ?")
            .bind(conversation_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.map(|r| {
            ConversationRow::from_row(&r)
                .map_err(|e| RepositoryError::Query(e.to_string()))?
                .into_conversation()
        })
        .transpose()
    }

    async fn save_message(&self, record: &MessageRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO messages (id, conversation_id, role, content, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(record.id.to_string())
        .bind(record.conversation_id.to_string())
        .bind(record.role.to_string())
        .bind(&record.content)
        .bind(record.created_at.to_rfc3339())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn get_messages(
        &self,
        conversation_id: &Uuid,
    ) -> Result<Vec<MessageRecord>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM messages WHERE conversation_id = ? ORDER BY created_at ASC, id ASC",
        )
        .bind(conversation_id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter()
            .map(|r| {
                MessageRow::from_row(r)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?
                    .into_record()
            })
            .collect()
    }

    async fn mark_sanctioned(
        &self,
        conversation_id: &Uuid,
        loan_amount: f64,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE conversations
             SET approval_status = ?, loan_status = ?, loan_amount = ?
             WHERE id = ?",
        )
        .bind(ApprovalStatus::Approved.to_string())
        .bind(LoanStatus::Sanctioned.to_string())
        .bind(loan_amount)
        .bind(conversation_id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
