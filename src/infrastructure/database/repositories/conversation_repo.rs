//! Conversation repository for database operations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;
use surrealdb::Surreal;

use crate::domain::models::{ChatMessage, Conversation, ConversationSummary};

/// Conversation record in database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub id: Option<Thing>,
    pub conversation_id: String,
    pub owner_id: String,
    pub title: String,
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ConversationRecord {
    pub fn into_conversation(self) -> Conversation {
        Conversation {
            id: self.conversation_id,
            title: self.title,
            owner_id: self.owner_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
            messages: self.messages,
        }
    }
}

/// Listing row with the message count computed in the query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSummaryRecord {
    pub conversation_id: String,
    pub title: String,
    pub updated_at: DateTime<Utc>,
    pub message_count: usize,
}

impl ConversationSummaryRecord {
    pub fn into_summary(self) -> ConversationSummary {
        ConversationSummary {
            id: self.conversation_id,
            title: self.title,
            updated_at: self.updated_at,
            message_count: self.message_count,
        }
    }
}

/// Conversation repository
pub struct ConversationRepository;

impl ConversationRepository {
    /// Create or update a conversation (upsert by conversation_id)
    pub async fn upsert(
        db: &Surreal<Db>,
        conversation: Conversation,
    ) -> Result<ConversationRecord, String> {
        // Try to update first
        let result: Option<ConversationRecord> = db
            .query(
                r#"
                UPDATE conversation SET
                    title = $title,
                    messages = $messages,
                    updated_at = time::now()
                WHERE conversation_id = $conversation_id AND owner_id = $owner_id
                RETURN AFTER
            "#,
            )
            .bind(("conversation_id", conversation.id.clone()))
            .bind(("owner_id", conversation.owner_id.clone()))
            .bind(("title", conversation.title.clone()))
            .bind(("messages", conversation.messages.clone()))
            .await
            .map_err(|e| format!("Failed to upsert conversation: {}", e))?
            .take(0)
            .map_err(|e| format!("Failed to get upsert result: {}", e))?;

        if let Some(record) = result {
            return Ok(record);
        }

        // If no update happened, insert new record
        let created: Option<ConversationRecord> = db
            .create("conversation")
            .content(ConversationRecord {
                id: None,
                conversation_id: conversation.id,
                owner_id: conversation.owner_id,
                title: conversation.title,
                messages: conversation.messages,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
            .await
            .map_err(|e| format!("Failed to create conversation: {}", e))?;

        created.ok_or_else(|| "Failed to create conversation".to_string())
    }

    /// Get all conversations for an owner, most recently updated first
    pub async fn find_by_owner(
        db: &Surreal<Db>,
        owner_id: &str,
    ) -> Result<Vec<ConversationSummaryRecord>, String> {
        let owner_id_owned = owner_id.to_string();
        let conversations: Vec<ConversationSummaryRecord> = db
            .query(
                r#"
                SELECT conversation_id, title, updated_at,
                       array::len(messages) AS message_count
                FROM conversation
                WHERE owner_id = $owner_id
                ORDER BY updated_at DESC
            "#,
            )
            .bind(("owner_id", owner_id_owned))
            .await
            .map_err(|e| format!("Failed to fetch conversations: {}", e))?
            .take(0)
            .map_err(|e| format!("Failed to parse conversations: {}", e))?;

        Ok(conversations)
    }

    /// Get conversation by its public id
    pub async fn find_by_id(
        db: &Surreal<Db>,
        conversation_id: &str,
    ) -> Result<Option<ConversationRecord>, String> {
        let conversation_id_owned = conversation_id.to_string();
        let mut result = db
            .query("SELECT * FROM conversation WHERE conversation_id = $conversation_id LIMIT 1")
            .bind(("conversation_id", conversation_id_owned))
            .await
            .map_err(|e| format!("Failed to query conversation: {}", e))?;

        let conversation: Option<ConversationRecord> = result
            .take(0)
            .map_err(|e| format!("Failed to get conversation: {}", e))?;

        Ok(conversation)
    }

    /// Rename a conversation owned by `owner_id`
    pub async fn rename(
        db: &Surreal<Db>,
        conversation_id: &str,
        owner_id: &str,
        title: &str,
    ) -> Result<(), String> {
        let conversation_id_owned = conversation_id.to_string();
        let owner_id_owned = owner_id.to_string();
        let title_owned = title.to_string();
        db.query(
            r#"
            UPDATE conversation SET
                title = $title,
                updated_at = time::now()
            WHERE conversation_id = $conversation_id AND owner_id = $owner_id
        "#,
        )
        .bind(("conversation_id", conversation_id_owned))
        .bind(("owner_id", owner_id_owned))
        .bind(("title", title_owned))
        .await
        .map_err(|e| format!("Failed to rename conversation: {}", e))?;

        Ok(())
    }

    /// Delete a conversation owned by `owner_id`. Published snapshots are
    /// detached copies and survive this.
    pub async fn delete(
        db: &Surreal<Db>,
        conversation_id: &str,
        owner_id: &str,
    ) -> Result<(), String> {
        let conversation_id_owned = conversation_id.to_string();
        let owner_id_owned = owner_id.to_string();
        db.query(
            "DELETE FROM conversation WHERE conversation_id = $conversation_id AND owner_id = $owner_id",
        )
        .bind(("conversation_id", conversation_id_owned))
        .bind(("owner_id", owner_id_owned))
        .await
        .map_err(|e| format!("Failed to delete conversation: {}", e))?;

        Ok(())
    }
}
