use crate::domain::models::ChatMessage;
use dioxus::prelude::*;
use uuid::Uuid;

/// Chat state management hook
#[derive(Clone)]
pub struct ChatState {
    pub messages: Signal<Vec<ChatMessage>>,
    pub input: Signal<String>,
    pub is_loading: Signal<bool>,
    pub status_line: Signal<Option<String>>,
    pub conversation_id: Signal<Option<String>>,
    pub conversation_title: Signal<Option<String>>,
    pub current_request_id: Signal<Option<String>>,
    pub draft_answer: Signal<Option<ChatMessage>>,
    pub suggestions: Signal<Vec<String>>,
}

impl ChatState {
    /// Add a message to the chat
    pub fn add_message(&mut self, message: ChatMessage) {
        self.messages.write().push(message);
    }

    /// Clear the input field
    pub fn clear_input(&mut self) {
        self.input.set(String::new());
    }

    /// Generate a new request ID
    pub fn generate_request_id(&mut self) -> String {
        let request_id = Uuid::new_v4().to_string();
        self.current_request_id.set(Some(request_id.clone()));
        request_id
    }

    /// Reset request state (after completion or failure)
    pub fn reset_request_state(&mut self) {
        self.is_loading.set(false);
        self.status_line.set(None);
        self.current_request_id.set(None);
        self.draft_answer.set(None);
    }

    /// Start a new request
    pub fn start_request(&mut self) {
        self.is_loading.set(true);
        self.status_line.set(Some("Sending question".to_string()));
    }

    /// Replace the whole thread, e.g. when opening a saved conversation
    pub fn load_messages(&mut self, conversation_id: String, title: String, messages: Vec<ChatMessage>) {
        self.messages.set(messages);
        self.conversation_id.set(Some(conversation_id));
        self.conversation_title.set(Some(title));
        self.reset_request_state();
    }
}

/// Hook to manage chat state
pub fn use_chat_state() -> ChatState {
    let messages = use_signal(Vec::<ChatMessage>::new);
    let input = use_signal(String::new);
    let is_loading = use_signal(|| false);
    let status_line = use_signal(|| None::<String>);
    let conversation_id = use_signal(|| None::<String>);
    let conversation_title = use_signal(|| None::<String>);
    let current_request_id = use_signal(|| None::<String>);
    let draft_answer = use_signal(|| None::<ChatMessage>);
    let suggestions = use_signal(Vec::<String>::new);

    ChatState {
        messages,
        input,
        is_loading,
        status_line,
        conversation_id,
        conversation_title,
        current_request_id,
        draft_answer,
        suggestions,
    }
}
