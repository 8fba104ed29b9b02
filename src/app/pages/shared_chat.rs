//! Public read-only view of a published conversation snapshot.
//! Server-rendered so share links work without hydration.

use crate::app::components::{render_markdown, CitationList, LoadingText};
use crate::app::pages::routes::Route;
use crate::domain::models::SnapshotThread;
use crate::server_fns::get_public_snapshot;
use crate::shared::utils::link_citation_markers;
use dioxus::prelude::*;

#[component]
pub fn SharedChatPage(share_id: String) -> Element {
    let snapshot = use_resource(move || {
        let share_id = share_id.clone();
        async move { get_public_snapshot(share_id).await }
    });

    rsx! {
        div { class: "c-shared-chat",
            match &*snapshot.read() {
                None => rsx! {
                    LoadingText { message: "Loading shared conversation..." }
                },
                Some(Err(e)) => {
                    tracing::error!("Failed to load snapshot: {}", e);
                    rsx! {
                        div { class: "c-shared-chat__missing",
                            "Could not load this shared conversation. Try again later."
                        }
                    }
                }
                Some(Ok(None)) => rsx! {
                    div { class: "c-shared-chat__missing",
                        "This shared conversation does not exist or is no longer available."
                    }
                },
                Some(Ok(Some(snapshot))) => rsx! {
                    div { class: "c-shared-chat__banner",
                        "Read-only snapshot shared from MediQuery Hub"
                    }
                    header { class: "c-shared-chat__header",
                        h1 { class: "c-shared-chat__title", "{snapshot.title}" }
                        span { class: "c-shared-chat__date",
                            {snapshot.created_at.format("Shared %-d %b %Y").to_string()}
                        }
                    }
                    div { class: "c-shared-chat__threads",
                        for thread in snapshot.threads.iter() {
                            SharedThread { thread: thread.clone() }
                        }
                    }
                    div { class: "c-shared-chat__cta",
                        Link { class: "btn btn--primary", to: Route::Home {},
                            "Ask your own question"
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn SharedThread(thread: SnapshotThread) -> Element {
    let answer_html = link_citation_markers(&render_markdown(&thread.answer), &thread.citations);

    rsx! {
        div { class: "c-shared-chat__thread",
            div { class: "c-chat-message c-chat-message--user",
                div { class: "c-chat-bubble c-chat-bubble--user", "{thread.question}" }
            }
            div { class: "c-chat-message c-chat-message--assistant",
                div {
                    class: "c-chat-bubble c-chat-bubble--assistant",
                    dangerous_inner_html: "{answer_html}",
                }
                if !thread.citations.is_empty() {
                    CitationList {
                        citations: thread.citations.clone(),
                        answer_text: thread.answer.clone(),
                    }
                }
            }
        }
    }
}
