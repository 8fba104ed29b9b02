//! Structured logging module for MediQuery Hub
//!
//! Provides consistent, contextual logging across the application.
//! Question text is never logged in full; it may contain patient details.

/// Log levels for different operations
#[derive(Debug, Clone, Copy)]
pub enum LogOperation {
    AnswerStream,
    ProxyForward,
    GuidelineSearch,
    DrugLookup,
    SuggestionFetch,
    ConversationStore,
    SnapshotPublish,
    ProfileUpdate,
}

impl LogOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogOperation::AnswerStream => "answer_stream",
            LogOperation::ProxyForward => "proxy_forward",
            LogOperation::GuidelineSearch => "guideline_search",
            LogOperation::DrugLookup => "drug_lookup",
            LogOperation::SuggestionFetch => "suggestion_fetch",
            LogOperation::ConversationStore => "conversation_store",
            LogOperation::SnapshotPublish => "snapshot_publish",
            LogOperation::ProfileUpdate => "profile_update",
        }
    }
}

/// Log answer stream start
pub fn log_answer_stream_start(request_id: &str, kind: &str, question_chars: usize) {
    tracing::info!(
        operation = LogOperation::AnswerStream.as_str(),
        request_id = request_id,
        question_kind = kind,
        question_chars = question_chars,
        "Starting answer stream"
    );
}

/// Log answer stream completion
pub fn log_answer_stream_complete(request_id: &str, chunk_count: usize) {
    tracing::info!(
        operation = LogOperation::AnswerStream.as_str(),
        request_id = request_id,
        chunk_count = chunk_count,
        "Answer stream completed"
    );
}

/// Log answer stream failure
pub fn log_answer_stream_error(request_id: &str, error: &str) {
    tracing::error!(
        operation = LogOperation::AnswerStream.as_str(),
        request_id = request_id,
        error = error,
        "Answer stream failed"
    );
}

/// Log a proxied upstream call
pub fn log_proxy_forward(service: &str, status: u16) {
    tracing::debug!(
        operation = LogOperation::ProxyForward.as_str(),
        service = service,
        upstream_status = status,
        "Forwarded upstream response"
    );
}

/// Log a failed upstream connection
pub fn log_proxy_error(service: &str, error: &str) {
    tracing::error!(
        operation = LogOperation::ProxyForward.as_str(),
        service = service,
        error = error,
        "Upstream request failed"
    );
}

/// Log a guideline search. Responses stream through untouched, so only
/// the query size is known here.
pub fn log_guideline_search(query_chars: usize) {
    tracing::debug!(
        operation = LogOperation::GuidelineSearch.as_str(),
        query_chars = query_chars,
        "Guideline search forwarded"
    );
}

/// Log a drug lookup
pub fn log_drug_lookup(query_chars: usize) {
    tracing::debug!(
        operation = LogOperation::DrugLookup.as_str(),
        query_chars = query_chars,
        "Drug lookup forwarded"
    );
}

/// Log conversation persistence
pub fn log_conversation_saved(conversation_id: &str, message_count: usize) {
    tracing::debug!(
        operation = LogOperation::ConversationStore.as_str(),
        conversation_id = conversation_id,
        message_count = message_count,
        "Conversation saved"
    );
}

/// Log snapshot publication
pub fn log_snapshot_published(share_id: &str, thread_count: usize) {
    tracing::info!(
        operation = LogOperation::SnapshotPublish.as_str(),
        share_id = share_id,
        thread_count = thread_count,
        "Snapshot published"
    );
}

/// Log profile update
pub fn log_profile_updated(user_id: &str) {
    tracing::info!(
        operation = LogOperation::ProfileUpdate.as_str(),
        user_id = user_id,
        "Profile updated"
    );
}

/// Macro for creating structured log context
#[macro_export]
macro_rules! log_context {
    ($operation:expr) => {
        tracing::info_span!("mediquery", operation = $operation)
    };
    ($operation:expr, $request:expr) => {
        tracing::info_span!("mediquery", operation = $operation, request_id = $request)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_operation_as_str() {
        assert_eq!(LogOperation::AnswerStream.as_str(), "answer_stream");
        assert_eq!(LogOperation::ProxyForward.as_str(), "proxy_forward");
        assert_eq!(LogOperation::GuidelineSearch.as_str(), "guideline_search");
        assert_eq!(LogOperation::DrugLookup.as_str(), "drug_lookup");
        assert_eq!(LogOperation::SuggestionFetch.as_str(), "suggestion_fetch");
        assert_eq!(LogOperation::ConversationStore.as_str(), "conversation_store");
        assert_eq!(LogOperation::SnapshotPublish.as_str(), "snapshot_publish");
        assert_eq!(LogOperation::ProfileUpdate.as_str(), "profile_update");
    }
}
