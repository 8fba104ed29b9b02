use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::citation::Citation;

/// What kind of answer the user is asking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    /// Open clinical question
    #[default]
    General,
    /// Guideline lookup
    Guideline,
    /// Drug information lookup
    Drug,
    /// Follow-up to an earlier answer in the same conversation
    Followup,
}

impl QuestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::General => "general",
            QuestionKind::Guideline => "guideline",
            QuestionKind::Drug => "drug",
            QuestionKind::Followup => "followup",
        }
    }
}

/// Message in a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum ChatMessage {
    User {
        content: String,
        timestamp: DateTime<Utc>,
        #[serde(default)]
        question_kind: QuestionKind,
    },
    Assistant {
        content: String,
        timestamp: DateTime<Utc>,
        #[serde(default)]
        citations: Vec<Citation>,
        #[serde(default)]
        followup_questions: Vec<String>,
    },
    /// Inline notice, e.g. a stream failure shown in the message list
    System {
        content: String,
        timestamp: DateTime<Utc>,
    },
}

impl ChatMessage {
    pub fn user(content: impl Into<String>, kind: QuestionKind) -> Self {
        Self::User {
            content: content.into(),
            timestamp: Utc::now(),
            question_kind: kind,
        }
    }

    pub fn assistant(
        content: impl Into<String>,
        citations: Vec<Citation>,
        followup_questions: Vec<String>,
    ) -> Self {
        Self::Assistant {
            content: content.into(),
            timestamp: Utc::now(),
            citations,
            followup_questions,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::System {
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn content(&self) -> &str {
        match self {
            ChatMessage::User { content, .. } => content,
            ChatMessage::Assistant { content, .. } => content,
            ChatMessage::System { content, .. } => content,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            ChatMessage::User { timestamp, .. } => *timestamp,
            ChatMessage::Assistant { timestamp, .. } => *timestamp,
            ChatMessage::System { timestamp, .. } => *timestamp,
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self, ChatMessage::User { .. })
    }
}

/// Conversation (collection of messages owned by one user)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub title: String,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new(id: impl Into<String>, title: impl Into<String>, owner_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: title.into(),
            owner_id: owner_id.into(),
            created_at: now,
            updated_at: now,
            messages: Vec::new(),
        }
    }
}

/// Lightweight row for the conversation sidebar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: String,
    pub title: String,
    pub updated_at: DateTime<Utc>,
    pub message_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_role_tag_round_trip() {
        let message = ChatMessage::user("What is the target INR for AF?", QuestionKind::General);
        let json = serde_json::to_string(&message).unwrap();
        assert!(json.contains(r#""role":"user""#));

        let parsed: ChatMessage = serde_json::from_str(&json).unwrap();
        assert!(parsed.is_user());
        assert_eq!(parsed.content(), "What is the target INR for AF?");
    }

    #[test]
    fn test_assistant_message_parses_without_optional_fields() {
        let json = r#"{"role":"assistant","content":"Target INR is 2-3 [1].","timestamp":"2024-05-01T10:00:00Z"}"#;
        let parsed: ChatMessage = serde_json::from_str(json).unwrap();
        match parsed {
            ChatMessage::Assistant {
                citations,
                followup_questions,
                ..
            } => {
                assert!(citations.is_empty());
                assert!(followup_questions.is_empty());
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_role_fails() {
        let json = r#"{"role":"tool","content":"x","timestamp":"2024-05-01T10:00:00Z"}"#;
        assert!(serde_json::from_str::<ChatMessage>(json).is_err());
    }

    #[test]
    fn test_conversation_new_sets_matching_timestamps() {
        let conversation = Conversation::new("c1", "Untitled", "user-1");
        assert_eq!(conversation.created_at, conversation.updated_at);
        assert!(conversation.messages.is_empty());
    }
}
