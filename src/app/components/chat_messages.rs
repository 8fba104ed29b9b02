//! Chat thread rendering: question and answer bubbles, streamed drafts,
//! markdown with linked citation markers and the reference list.

use crate::app::components::CitationList;
use crate::domain::models::ChatMessage;
use crate::shared::utils::link_citation_markers;
use dioxus::prelude::*;
use pulldown_cmark::{html, Options, Parser};

#[cfg(target_arch = "wasm32")]
use js_sys::eval as js_eval;

/// Helper function to render Markdown to HTML
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

#[component]
pub fn ChatMessages(
    messages: Signal<Vec<ChatMessage>>,
    draft_answer: Signal<Option<ChatMessage>>,
    status_line: Signal<Option<String>>,
    on_followup: EventHandler<String>,
) -> Element {
    // Auto-scroll to bottom when the thread grows or a chunk arrives
    use_effect(move || {
        let has_content = !messages.read().is_empty() || draft_answer.read().is_some();
        if has_content {
            #[cfg(target_arch = "wasm32")]
            {
                let script = r#"
                    setTimeout(() => {
                        const messagesEnd = document.getElementById('messages-end');
                        if (messagesEnd) {
                            messagesEnd.scrollIntoView({ behavior: 'smooth' });
                        }
                    }, 100);
                "#;
                let _ = js_eval(script);
            }
        }
    });

    rsx! {
        div { class: "c-chat-messages",
            if messages.read().is_empty() && draft_answer.read().is_none() {
                ThreadEmptyState {}
            } else {
                for message in messages.read().iter() {
                    MessageItem {
                        message: message.clone(),
                        on_followup: on_followup,
                    }
                }

                // Draft answer still streaming in
                if let Some(draft) = draft_answer.read().clone() {
                    div { class: "c-chat-message c-chat-message--assistant c-chat-message--streaming",
                        div {
                            class: "c-chat-bubble c-chat-bubble--assistant",
                            dangerous_inner_html: render_markdown(draft.content()),
                        }
                    }
                }

                // Upstream progress stage while waiting
                if let Some(status) = status_line.read().clone() {
                    div { class: "c-chat-status",
                        span { class: "c-chat-status__spinner" }
                        span { class: "c-chat-status__text", "{status}" }
                    }
                }

                div { id: "messages-end" }
            }
        }
    }
}

#[component]
fn ThreadEmptyState() -> Element {
    rsx! {
        div { class: "c-empty-state",
            div { class: "c-empty-state__icon", "🩺" }
            h2 { class: "c-empty-state__title", "Ask a clinical question" }
            p { class: "c-empty-state__description",
                "Answers cite guidelines and journal articles so you can verify every claim."
            }
        }
    }
}

#[component]
fn MessageItem(message: ChatMessage, on_followup: EventHandler<String>) -> Element {
    match message {
        ChatMessage::User { content, timestamp, .. } => {
            let time_str = timestamp.format("%H:%M").to_string();
            rsx! {
                div { class: "c-chat-message c-chat-message--user",
                    div { class: "c-chat-bubble c-chat-bubble--user", "{content}" }
                    span { class: "c-chat-message__timestamp", "{time_str}" }
                }
            }
        }

        ChatMessage::Assistant { content, timestamp, citations, followup_questions } => {
            let time_str = timestamp.format("%H:%M").to_string();
            let html = link_citation_markers(&render_markdown(&content), &citations);
            rsx! {
                div { class: "c-chat-message c-chat-message--assistant",
                    div {
                        class: "c-chat-bubble c-chat-bubble--assistant",
                        dangerous_inner_html: "{html}",
                    }

                    if !citations.is_empty() {
                        CitationList {
                            citations: citations.clone(),
                            answer_text: content.clone(),
                        }
                    }

                    if !followup_questions.is_empty() {
                        div { class: "c-followups",
                            span { class: "c-followups__label", "Follow-up questions" }
                            for question in followup_questions.iter() {
                                button {
                                    class: "c-followups__chip",
                                    onclick: {
                                        let question = question.clone();
                                        move |_| on_followup.call(question.clone())
                                    },
                                    "{question}"
                                }
                            }
                        }
                    }

                    span { class: "c-chat-message__timestamp", "{time_str}" }
                }
            }
        }

        ChatMessage::System { content, timestamp } => {
            let time_str = timestamp.format("%H:%M:%S").to_string();
            rsx! {
                div { class: "c-chat-message c-chat-message--system",
                    span { class: "c-chat-message__system-icon", "⚠️" }
                    span { class: "c-chat-message__system-text", "{content}" }
                    span { class: "c-chat-message__timestamp", "{time_str}" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_markdown_basic() {
        let html = render_markdown("**bold** and `code`");
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<code>code</code>"));
    }

    #[test]
    fn test_render_markdown_tables_enabled() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_render_markdown_escapes_raw_angle_brackets() {
        let html = render_markdown("dose < 5 mg");
        assert!(html.contains("&lt;"));
    }
}
