use crate::domain::models::{ChatMessage, StreamEvent, StructuredAnswer};
use dioxus::prelude::*;

/// Process a single NDJSON line from the answer stream
pub fn process_stream_line(
    line: &str,
    mut messages: Signal<Vec<ChatMessage>>,
    mut draft_answer: Signal<Option<ChatMessage>>,
    mut status_line: Signal<Option<String>>,
    mut is_loading: Signal<bool>,
) {
    let event: StreamEvent = match serde_json::from_str(line) {
        Ok(e) => e,
        Err(e) => {
            tracing::error!("Failed to parse stream line: {} - Line: {}", e, line);
            return;
        }
    };

    match event {
        StreamEvent::Processing { stage } => {
            status_line.set(Some(stage.unwrap_or_else(|| "Working on it".to_string())));
        }

        StreamEvent::Chunk { content } => {
            status_line.set(None);
            let updated = append_to_draft(draft_answer(), &content);
            draft_answer.set(Some(updated));
        }

        StreamEvent::Complete { answer } => {
            messages.write().push(finalize_answer(answer));
            draft_answer.set(None);
            status_line.set(None);
            is_loading.set(false);
        }

        StreamEvent::Error { error } => {
            messages
                .write()
                .push(ChatMessage::system(format!("Error: {}", error)));
            draft_answer.set(None);
            status_line.set(None);
            is_loading.set(false);
        }
    }
}

/// Append a chunk to the in-progress assistant message, creating it on the
/// first chunk
pub fn append_to_draft(draft: Option<ChatMessage>, chunk: &str) -> ChatMessage {
    match draft {
        Some(ChatMessage::Assistant {
            mut content,
            timestamp,
            citations,
            followup_questions,
        }) => {
            content.push_str(chunk);
            ChatMessage::Assistant {
                content,
                timestamp,
                citations,
                followup_questions,
            }
        }
        _ => ChatMessage::assistant(chunk, vec![], vec![]),
    }
}

/// The `complete` event replaces whatever the chunks accumulated
pub fn finalize_answer(answer: StructuredAnswer) -> ChatMessage {
    ChatMessage::assistant(answer.text, answer.citations, answer.followup_questions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunks_accumulate_in_order() {
        let draft = append_to_draft(None, "Beta blockers ");
        let draft = append_to_draft(Some(draft), "reduce mortality");
        assert_eq!(draft.content(), "Beta blockers reduce mortality");
    }

    #[test]
    fn test_finalize_replaces_draft_content() {
        let mut answer = StructuredAnswer::new("Final text [1].");
        answer.followup_questions.push("What about dosing?".to_string());

        let message = finalize_answer(answer);
        assert_eq!(message.content(), "Final text [1].");
        match message {
            ChatMessage::Assistant {
                followup_questions, ..
            } => assert_eq!(followup_questions.len(), 1),
            other => panic!("unexpected message: {:?}", other),
        }
    }
}
