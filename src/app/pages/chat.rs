use crate::app::components::{ChatInput, ChatMessages, SuggestionChips};
use crate::app::pages::routes::ConversationListVersion;
use crate::domain::models::{AskRequest, ChatMessage, Conversation, HistoryEntry, QuestionKind};
use crate::server_fns::{get_conversation, get_profile, publish_snapshot, save_conversation};
use crate::shared::constants::FALLBACK_SUGGESTIONS;
use crate::shared::hooks::{ensure_session_marker, use_chat_state, use_session_sync};
use crate::shared::services::ApiService;
use crate::shared::utils::process_stream_line;
use dioxus::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Request, RequestInit, RequestMode, Response};

/// Chat dashboard: streamed cited answers with suggestion chips, history
/// persistence and snapshot sharing.
#[component]
pub fn ChatPanel(#[props(default)] conversation_id: Option<String>) -> Element {
    let user_id = use_signal(ensure_session_marker);
    let chat_state = use_chat_state();
    let logged_out = use_session_sync();
    let specialties = use_signal(Vec::<String>::new);
    let mut share_link = use_signal(|| None::<String>);
    let mut is_publishing = use_signal(|| false);
    let list_version = use_context::<ConversationListVersion>();

    // Open an existing conversation when the route carries one. The panel is
    // keyed on the conversation id, so this runs once per mount.
    {
        let conversation_id = conversation_id.clone();
        let chat_state = chat_state.clone();
        use_effect(move || {
            let Some(id) = conversation_id.clone() else {
                return;
            };
            let mut chat_state = chat_state.clone();
            spawn(async move {
                match get_conversation(user_id(), id.clone()).await {
                    Ok(Some(conversation)) => {
                        chat_state.load_messages(
                            conversation.id,
                            conversation.title,
                            conversation.messages,
                        );
                    }
                    Ok(None) => {
                        chat_state
                            .add_message(ChatMessage::system("This conversation is not available"));
                    }
                    Err(e) => {
                        tracing::error!("Failed to load conversation {}: {:?}", id, e);
                        chat_state
                            .add_message(ChatMessage::system("Failed to load this conversation"));
                    }
                }
            });
        });
    }

    // Fetch profile specialties, then personalized suggestions. The static
    // list covers a failed or empty suggestion call.
    {
        let chat_state = chat_state.clone();
        let mut specialties = specialties;
        use_effect(move || {
            let mut chat_state = chat_state.clone();
            spawn(async move {
                let profile_specialties = match get_profile(user_id()).await {
                    Ok(Some(profile)) => profile.specialties,
                    _ => Vec::new(),
                };
                specialties.set(profile_specialties.clone());

                let api = ApiService::new();
                let fetched = match api.fetch_suggestions(profile_specialties).await {
                    Ok(response) if !response.suggestions.is_empty() => response.suggestions,
                    Ok(_) => fallback_suggestions(),
                    Err(e) => {
                        tracing::warn!("Suggestion fetch failed, using fallback: {}", e);
                        fallback_suggestions()
                    }
                };
                chat_state.suggestions.set(fetched);
            });
        });
    }

    // Send a question and pump the NDJSON answer stream into the thread
    let send_message = {
        let chat_state = chat_state.clone();

        move |question: String, kind: QuestionKind| {
            let mut chat_state = chat_state.clone();

            spawn_local(async move {
                // Earlier turns, oldest first; inline notices are not context
                let history: Vec<HistoryEntry> = chat_state
                    .messages
                    .read()
                    .iter()
                    .filter_map(|m| match m {
                        ChatMessage::User { content, .. } => Some(HistoryEntry::user(content)),
                        ChatMessage::Assistant { content, .. } => {
                            Some(HistoryEntry::assistant(content))
                        }
                        ChatMessage::System { .. } => None,
                    })
                    .collect();

                chat_state.add_message(ChatMessage::user(question.clone(), kind));
                let request_id = chat_state.generate_request_id();
                tracing::info!("ask {} started ({} history entries)", request_id, history.len());
                chat_state.clear_input();
                chat_state.start_request();

                let ask_request = AskRequest::new(question)
                    .with_kind(kind)
                    .with_history(history)
                    .with_specialties(specialties());

                let request_body = match serde_json::to_string(&ask_request) {
                    Ok(body) => body,
                    Err(e) => {
                        tracing::error!("Failed to serialize request: {}", e);
                        chat_state.add_message(ChatMessage::system(format!(
                            "Error: failed to build request - {}",
                            e
                        )));
                        chat_state.reset_request_state();
                        return;
                    }
                };

                let window = match web_sys::window() {
                    Some(w) => w,
                    None => {
                        tracing::error!("No window object available");
                        chat_state.reset_request_state();
                        return;
                    }
                };

                // Build fetch request
                let mut opts = RequestInit::new();
                opts.method("POST");
                opts.mode(RequestMode::SameOrigin);
                opts.body(Some(&JsValue::from_str(&request_body)));

                let request = match Request::new_with_str_and_init("/api/ask", &opts) {
                    Ok(req) => req,
                    Err(e) => {
                        tracing::error!("Failed to create request: {:?}", e);
                        chat_state
                            .add_message(ChatMessage::system("Error: failed to create request"));
                        chat_state.reset_request_state();
                        return;
                    }
                };

                if let Err(e) = request.headers().set("Content-Type", "application/json") {
                    tracing::error!("Failed to set header: {:?}", e);
                }
                let auth = format!("Bearer {}", user_id());
                if let Err(e) = request.headers().set("Authorization", &auth) {
                    tracing::error!("Failed to set header: {:?}", e);
                }

                // Fetch with streaming
                let resp_promise = window.fetch_with_request(&request);
                let resp_value = match JsFuture::from(resp_promise).await {
                    Ok(v) => v,
                    Err(e) => {
                        tracing::error!("Fetch failed: {:?}", e);
                        chat_state
                            .add_message(ChatMessage::system("Error: network request failed"));
                        chat_state.reset_request_state();
                        return;
                    }
                };

                let response: Response = resp_value.dyn_into().unwrap();

                if !response.ok() {
                    let status = response.status();
                    tracing::error!("Server error: {}", status);
                    let notice = if status == 401 {
                        "Your session is no longer valid. Reload the page to continue.".to_string()
                    } else {
                        format!("Server error: {}", status)
                    };
                    chat_state.add_message(ChatMessage::system(notice));
                    chat_state.reset_request_state();
                    return;
                }

                // Stream response body (NDJSON - newline delimited)
                let body = match response.body() {
                    Some(b) => b,
                    None => {
                        tracing::error!("No response body");
                        chat_state.reset_request_state();
                        return;
                    }
                };

                let reader = body
                    .get_reader()
                    .dyn_into::<web_sys::ReadableStreamDefaultReader>()
                    .unwrap();
                let mut buffer = String::new();

                // Read stream chunks
                loop {
                    let result = match JsFuture::from(reader.read()).await {
                        Ok(r) => r,
                        Err(e) => {
                            tracing::error!("Error reading stream: {:?}", e);
                            break;
                        }
                    };

                    let done = js_sys::Reflect::get(&result, &JsValue::from_str("done"))
                        .unwrap_or(JsValue::TRUE)
                        .as_bool()
                        .unwrap_or(true);

                    if done {
                        break;
                    }

                    let value = js_sys::Reflect::get(&result, &JsValue::from_str("value"))
                        .ok()
                        .and_then(|v| v.dyn_into::<js_sys::Uint8Array>().ok());

                    if let Some(chunk) = value {
                        let bytes = chunk.to_vec();
                        if let Ok(text) = String::from_utf8(bytes) {
                            buffer.push_str(&text);

                            // Process complete NDJSON lines
                            while let Some(newline_pos) = buffer.find('\n') {
                                let line = buffer[..newline_pos].to_string();
                                buffer = buffer[newline_pos + 1..].to_string();

                                if line.trim().is_empty() {
                                    continue;
                                }

                                process_stream_line(
                                    &line,
                                    chat_state.messages,
                                    chat_state.draft_answer,
                                    chat_state.status_line,
                                    chat_state.is_loading,
                                );
                            }
                        }
                    }
                }

                // Process any remaining buffer content
                if !buffer.trim().is_empty() {
                    process_stream_line(
                        &buffer,
                        chat_state.messages,
                        chat_state.draft_answer,
                        chat_state.status_line,
                        chat_state.is_loading,
                    );
                }

                // A dropped connection leaves no terminal event behind
                if *chat_state.is_loading.read() {
                    chat_state.add_message(ChatMessage::system("Connection interrupted"));
                    chat_state.reset_request_state();
                }

                persist_conversation(&mut chat_state, user_id(), list_version).await;
            });
        }
    };

    let on_submit = {
        let chat_state = chat_state.clone();
        let send_message = send_message.clone();
        move |_| {
            let input_value = (*chat_state.input.read()).clone();
            if !input_value.trim().is_empty() && !*chat_state.is_loading.read() {
                send_message(input_value, QuestionKind::General);
            }
        }
    };

    let on_followup = {
        let send_message = send_message.clone();
        move |question: String| {
            send_message(question, QuestionKind::Followup);
        }
    };

    let on_pick_suggestion = {
        let send_message = send_message.clone();
        move |question: String| {
            send_message(question, QuestionKind::General);
        }
    };

    let publish_share = {
        let chat_state = chat_state.clone();
        move |_| {
            let Some(conversation_id) = (*chat_state.conversation_id.read()).clone() else {
                return;
            };
            let mut chat_state = chat_state.clone();
            is_publishing.set(true);
            spawn(async move {
                match publish_snapshot(user_id(), conversation_id).await {
                    Ok(share_id) => {
                        let origin = web_sys::window()
                            .and_then(|w| w.location().origin().ok())
                            .unwrap_or_default();
                        share_link.set(Some(format!("{}/shared/{}", origin, share_id)));
                    }
                    Err(e) => {
                        tracing::error!("Failed to publish snapshot: {:?}", e);
                        chat_state
                            .add_message(ChatMessage::system("Could not create a share link"));
                    }
                }
                is_publishing.set(false);
            });
        }
    };

    let copy_share_link = move |_| {
        if let Some(link) = share_link.read().clone() {
            if let Ok(quoted) = serde_json::to_string(&link) {
                let _ = document::eval(&format!("navigator.clipboard.writeText({})", quoted));
            }
        }
    };

    let show_thread = !chat_state.messages.read().is_empty();
    let can_share = show_thread && chat_state.conversation_id.read().is_some();

    rsx! {
        div { class: "c-chat-panel",
            if logged_out() {
                div { class: "c-chat-panel__logout-banner",
                    "You signed out in another tab. Reload the page to start a new session."
                }
            }

            if can_share {
                div { class: "c-chat-panel__share-row",
                    button {
                        class: "btn btn--secondary",
                        disabled: is_publishing(),
                        onclick: publish_share,
                        if is_publishing() { "Publishing..." } else { "Share" }
                    }
                    if let Some(link) = share_link.read().clone() {
                        input {
                            class: "c-chat-panel__share-link",
                            readonly: true,
                            value: "{link}",
                        }
                        button {
                            class: "btn btn--secondary",
                            onclick: copy_share_link,
                            "Copy"
                        }
                    }
                }
            }

            ChatMessages {
                messages: chat_state.messages,
                draft_answer: chat_state.draft_answer,
                status_line: chat_state.status_line,
                on_followup: on_followup,
            }

            if !show_thread {
                SuggestionChips {
                    suggestions: chat_state.suggestions,
                    is_loading: chat_state.is_loading,
                    on_pick: on_pick_suggestion,
                }
            }

            ChatInput {
                input: chat_state.input,
                is_loading: chat_state.is_loading,
                on_submit: on_submit,
            }
        }
    }
}

fn fallback_suggestions() -> Vec<String> {
    FALLBACK_SUGGESTIONS.iter().map(|s| s.to_string()).collect()
}

/// Save the thread after an answered exchange and bump the sidebar list
async fn persist_conversation(
    chat_state: &mut crate::shared::hooks::ChatState,
    user_id: String,
    mut list_version: ConversationListVersion,
) {
    let answered = matches!(
        chat_state.messages.read().last(),
        Some(ChatMessage::Assistant { .. })
    );
    if !answered {
        return;
    }

    let messages = chat_state.messages.read().clone();
    let conversation_id = (*chat_state.conversation_id.read())
        .clone()
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let title = (*chat_state.conversation_title.read())
        .clone()
        .unwrap_or_else(|| derive_title(&messages));

    let mut conversation = Conversation::new(conversation_id, title, user_id);
    conversation.messages = messages;

    match save_conversation(conversation).await {
        Ok(saved) => {
            chat_state.conversation_id.set(Some(saved.id));
            chat_state.conversation_title.set(Some(saved.title));
            *list_version.0.write() += 1;
        }
        Err(e) => {
            tracing::error!("Failed to save conversation: {:?}", e);
        }
    }
}

/// First question, truncated, as the default conversation title
fn derive_title(messages: &[ChatMessage]) -> String {
    const MAX_TITLE_CHARS: usize = 80;

    let first_question = messages
        .iter()
        .find(|m| m.is_user())
        .map(|m| m.content().trim().to_string())
        .unwrap_or_else(|| "New conversation".to_string());

    if first_question.chars().count() > MAX_TITLE_CHARS {
        let truncated: String = first_question.chars().take(MAX_TITLE_CHARS).collect();
        format!("{}…", truncated)
    } else {
        first_question
    }
}
