use serde::{Deserialize, Serialize};

use super::answer::StructuredAnswer;
use super::message::QuestionKind;

/// One line of the answer stream (NDJSON format)
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum StreamEvent {
    /// Upstream is still working; `stage` is a short human-readable label
    Processing {
        #[serde(skip_serializing_if = "Option::is_none")]
        stage: Option<String>,
    },
    /// Incremental answer text
    Chunk { content: String },
    /// Final structured answer with citations and followups
    Complete { answer: StructuredAnswer },
    /// Stream failed; no further events follow
    Error { error: String },
}

impl StreamEvent {
    pub fn processing(stage: impl Into<String>) -> Self {
        Self::Processing {
            stage: Some(stage.into()),
        }
    }

    pub fn chunk(content: impl Into<String>) -> Self {
        Self::Chunk {
            content: content.into(),
        }
    }

    pub fn complete(answer: StructuredAnswer) -> Self {
        Self::Complete { answer }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self::Error { error: msg.into() }
    }

    /// Convert to NDJSON line
    pub fn to_ndjson(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Prior exchange turn forwarded to the answer service for context
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HistoryEntry {
    /// "user" or "assistant"
    pub role: String,
    pub content: String,
}

impl HistoryEntry {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for POST /api/ask
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AskRequest {
    /// Question text to answer
    pub question: String,

    /// What kind of answer the client expects
    #[serde(default)]
    pub kind: QuestionKind,

    /// Earlier turns of the conversation, oldest first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<HistoryEntry>,

    /// Clinical specialties from the user profile, used to steer the answer
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub specialties: Vec<String>,
}

impl AskRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            kind: QuestionKind::default(),
            history: Vec::new(),
            specialties: Vec::new(),
        }
    }

    pub fn with_kind(mut self, kind: QuestionKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_history(mut self, history: Vec<HistoryEntry>) -> Self {
        self.history = history;
        self
    }

    pub fn with_specialties(mut self, specialties: Vec<String>) -> Self {
        self.specialties = specialties;
        self
    }

    /// Keep only the most recent `max` history entries
    pub fn cap_history(&mut self, max: usize) {
        if self.history.len() > max {
            let start = self.history.len() - max;
            self.history.drain(..start);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_event_chunk_round_trip() {
        let json = StreamEvent::chunk("Beta blockers reduce").to_ndjson().unwrap();
        assert!(json.contains(r#""status":"chunk""#));

        let parsed: StreamEvent = serde_json::from_str(&json).unwrap();
        match parsed {
            StreamEvent::Chunk { content } => assert_eq!(content, "Beta blockers reduce"),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_stream_event_processing_stage_is_optional() {
        let parsed: StreamEvent = serde_json::from_str(r#"{"status":"processing"}"#).unwrap();
        match parsed {
            StreamEvent::Processing { stage } => assert!(stage.is_none()),
            other => panic!("unexpected event: {:?}", other),
        }

        let json = StreamEvent::processing("Searching guidelines").to_ndjson().unwrap();
        assert!(json.contains("Searching guidelines"));
    }

    #[test]
    fn test_stream_event_unknown_status_fails() {
        let result = serde_json::from_str::<StreamEvent>(r#"{"status":"heartbeat"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_ask_request_builder() {
        let request = AskRequest::new("Max dose of metformin?")
            .with_kind(QuestionKind::Drug)
            .with_history(vec![HistoryEntry::user("prior question")])
            .with_specialties(vec!["endocrinology".to_string()]);

        assert_eq!(request.question, "Max dose of metformin?");
        assert_eq!(request.kind, QuestionKind::Drug);
        assert_eq!(request.history.len(), 1);
        assert_eq!(request.specialties, vec!["endocrinology".to_string()]);
    }

    #[test]
    fn test_cap_history_keeps_most_recent() {
        let mut request = AskRequest::new("q").with_history(
            (0..20).map(|i| HistoryEntry::user(format!("turn {}", i))).collect(),
        );
        request.cap_history(12);

        assert_eq!(request.history.len(), 12);
        assert_eq!(request.history[0].content, "turn 8");
        assert_eq!(request.history[11].content, "turn 19");
    }

    #[test]
    fn test_ask_request_defaults_on_deserialize() {
        let request: AskRequest =
            serde_json::from_str(r#"{"question":"What is the CHA2DS2-VASc score?"}"#).unwrap();
        assert_eq!(request.kind, QuestionKind::General);
        assert!(request.history.is_empty());
        assert!(request.specialties.is_empty());
    }
}
