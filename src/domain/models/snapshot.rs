use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::citation::Citation;
use super::message::{ChatMessage, Conversation};

/// One question/answer pair inside a published snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotThread {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub citations: Vec<Citation>,
}

/// Read-only copy of a conversation published under a share link.
/// Detached from the source conversation: later edits do not propagate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicChatSnapshot {
    pub share_id: String,
    pub title: String,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub threads: Vec<SnapshotThread>,
}

impl PublicChatSnapshot {
    /// Freeze a conversation into a shareable snapshot.
    /// Pairs each user question with the assistant answer that follows it;
    /// questions still awaiting an answer are skipped.
    pub fn from_conversation(conversation: &Conversation) -> Self {
        let mut threads = Vec::new();
        let mut pending_question: Option<String> = None;

        for message in &conversation.messages {
            match message {
                ChatMessage::User { content, .. } => {
                    pending_question = Some(content.clone());
                }
                ChatMessage::Assistant {
                    content, citations, ..
                } => {
                    if let Some(question) = pending_question.take() {
                        threads.push(SnapshotThread {
                            question,
                            answer: content.clone(),
                            citations: citations.clone(),
                        });
                    }
                }
                // Inline notices never appear in published snapshots
                ChatMessage::System { .. } => {}
            }
        }

        let share_id = derive_share_id(&conversation.owner_id, &conversation.title, &threads);

        Self {
            share_id,
            title: conversation.title.clone(),
            owner_id: conversation.owner_id.clone(),
            created_at: Utc::now(),
            threads,
        }
    }
}

/// Stable share identifier: SHA256 over owner, title and thread contents,
/// truncated to 16 hex chars. Republishing unchanged content yields the
/// same link.
pub fn derive_share_id(owner_id: &str, title: &str, threads: &[SnapshotThread]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(owner_id.as_bytes());
    hasher.update(title.as_bytes());
    for thread in threads {
        hasher.update(thread.question.as_bytes());
        hasher.update(thread.answer.as_bytes());
    }
    let digest = format!("{:x}", hasher.finalize());
    digest[..16].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::QuestionKind;

    fn conversation_with_exchange() -> Conversation {
        let mut conversation = Conversation::new("c1", "AF anticoagulation", "user-1");
        conversation
            .messages
            .push(ChatMessage::user("Target INR in AF?", QuestionKind::General));
        conversation
            .messages
            .push(ChatMessage::assistant("2 to 3 [1].", vec![], vec![]));
        conversation
    }

    #[test]
    fn test_share_id_is_stable() {
        let conversation = conversation_with_exchange();
        let first = PublicChatSnapshot::from_conversation(&conversation);
        let second = PublicChatSnapshot::from_conversation(&conversation);

        assert_eq!(first.share_id, second.share_id);
        assert_eq!(first.share_id.len(), 16);
        assert!(first.share_id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_share_id_changes_with_content() {
        let conversation = conversation_with_exchange();
        let mut edited = conversation.clone();
        edited.messages.push(ChatMessage::user("And in mechanical valves?", QuestionKind::Followup));
        edited
            .messages
            .push(ChatMessage::assistant("2.5 to 3.5 [1].", vec![], vec![]));

        let original = PublicChatSnapshot::from_conversation(&conversation);
        let updated = PublicChatSnapshot::from_conversation(&edited);
        assert_ne!(original.share_id, updated.share_id);
    }

    #[test]
    fn test_unanswered_question_is_skipped() {
        let mut conversation = conversation_with_exchange();
        conversation
            .messages
            .push(ChatMessage::user("Still streaming?", QuestionKind::General));

        let snapshot = PublicChatSnapshot::from_conversation(&conversation);
        assert_eq!(snapshot.threads.len(), 1);
        assert_eq!(snapshot.threads[0].question, "Target INR in AF?");
    }
}
