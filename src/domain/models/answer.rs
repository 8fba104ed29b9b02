use serde::{Deserialize, Serialize};

use super::citation::Citation;

/// Final answer payload carried by the stream's `complete` event
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StructuredAnswer {
    /// Full answer text in Markdown with inline `[n]` citation markers
    pub text: String,

    /// Sources referenced by the markers, 1-indexed in marker order
    #[serde(default)]
    pub citations: Vec<Citation>,

    /// Suggested next questions for the conversation
    #[serde(default)]
    pub followup_questions: Vec<String>,
}

impl StructuredAnswer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            citations: Vec::new(),
            followup_questions: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_parses_with_missing_optional_fields() {
        let answer: StructuredAnswer =
            serde_json::from_str(r#"{"text":"Aspirin is indicated [1]."}"#).unwrap();
        assert_eq!(answer.text, "Aspirin is indicated [1].");
        assert!(answer.citations.is_empty());
        assert!(answer.followup_questions.is_empty());
    }
}
