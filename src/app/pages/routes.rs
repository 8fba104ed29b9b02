use crate::app::components::{ConversationsLoading, ThemeToggle};
#[cfg(target_arch = "wasm32")]
use crate::app::pages::{ChatPanel, DrugPanel, GuidelinePanel, ProfilePanel};
use crate::app::pages::shared_chat::SharedChatPage;
use crate::domain::models::ConversationSummary;
use crate::server_fns::{delete_conversation, list_conversations, rename_conversation};
#[cfg(target_arch = "wasm32")]
use crate::shared::hooks::ensure_session_marker;
use chrono::{DateTime, Datelike, Duration, Utc};

use dioxus::document;
use dioxus::prelude::*;

/// Bumped whenever a conversation is saved, renamed or deleted so the
/// sidebar list refetches.
#[derive(Clone, Copy)]
pub struct ConversationListVersion(pub Signal<u32>);

// Stub components for server-side rendering
#[cfg(not(target_arch = "wasm32"))]
#[component]
fn ChatPanel(#[props(default)] conversation_id: Option<String>) -> Element {
    let _ = conversation_id;
    rsx! {
        div { class: "chat-panel-placeholder",
            style: "padding: 2rem; text-align: center;",
            div { class: "loading-spinner", "🩺" }
            p { "Loading chat..." }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[component]
fn GuidelinePanel() -> Element {
    rsx! {
        div { class: "lookup-panel-placeholder",
            style: "padding: 2rem; text-align: center; color: var(--muted-foreground);",
            "📋 Guideline search (requires client-side JavaScript)"
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[component]
fn DrugPanel() -> Element {
    rsx! {
        div { class: "lookup-panel-placeholder",
            style: "padding: 2rem; text-align: center; color: var(--muted-foreground);",
            "💊 Drug lookup (requires client-side JavaScript)"
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[component]
fn ProfilePanel() -> Element {
    rsx! {
        div { class: "profile-panel-placeholder",
            style: "padding: 2rem; text-align: center; color: var(--muted-foreground);",
            "👤 Loading profile..."
        }
    }
}

// Helper function to format relative time for the sidebar
fn format_relative_time(timestamp: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let diff = *now - *timestamp;
    let date = timestamp.date_naive();
    let today = now.date_naive();
    let yesterday = today - Duration::days(1);

    if diff.num_minutes() < 1 {
        "just now".to_string()
    } else if diff.num_minutes() < 60 {
        format!("{}min", diff.num_minutes())
    } else if diff.num_hours() < 24 && date == today {
        format!("{}h", diff.num_hours())
    } else if date == yesterday {
        "Yesterday".to_string()
    } else if diff.num_days() < 7 {
        let day_names = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
        let weekday = timestamp.weekday().num_days_from_sunday() as usize;
        day_names[weekday].to_string()
    } else {
        let month_names = ["Jan", "Feb", "Mar", "Apr", "May", "Jun",
                          "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];
        let month = timestamp.month0() as usize;
        format!("{} {}", timestamp.day(), month_names[month])
    }
}

// Helper function to group conversations by time period
fn group_conversations_for_display(
    conversations: &[ConversationSummary],
    now: &DateTime<Utc>,
) -> Vec<(String, Vec<ConversationSummary>)> {
    let today = now.date_naive();
    let yesterday = today - Duration::days(1);
    let week_ago = today - Duration::days(7);
    let month_ago = today - Duration::days(30);

    let mut today_conversations = Vec::new();
    let mut yesterday_conversations = Vec::new();
    let mut this_week_conversations = Vec::new();
    let mut this_month_conversations = Vec::new();
    let mut older_conversations = Vec::new();

    // Sort by date, most recent first
    let mut sorted: Vec<_> = conversations.to_vec();
    sorted.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

    for conversation in sorted {
        let conversation_date = conversation.updated_at.date_naive();

        if conversation_date == today {
            today_conversations.push(conversation);
        } else if conversation_date == yesterday {
            yesterday_conversations.push(conversation);
        } else if conversation_date > week_ago {
            this_week_conversations.push(conversation);
        } else if conversation_date > month_ago {
            this_month_conversations.push(conversation);
        } else {
            older_conversations.push(conversation);
        }
    }

    let mut groups = Vec::new();
    if !today_conversations.is_empty() {
        groups.push(("Today".to_string(), today_conversations));
    }
    if !yesterday_conversations.is_empty() {
        groups.push(("Yesterday".to_string(), yesterday_conversations));
    }
    if !this_week_conversations.is_empty() {
        groups.push(("This week".to_string(), this_week_conversations));
    }
    if !this_month_conversations.is_empty() {
        groups.push(("This month".to_string(), this_month_conversations));
    }
    if !older_conversations.is_empty() {
        groups.push(("Older".to_string(), older_conversations));
    }

    groups
}

/// One conversation row in the sidebar, with rename and delete affordances
#[component]
fn ConversationItem(
    conversation: ConversationSummary,
    user_id: String,
    /// Callback after a successful delete
    on_deleted: EventHandler<String>,
    /// Callback after a successful rename
    on_renamed: EventHandler<()>,
) -> Element {
    let mut show_confirm = use_signal(|| false);
    let mut is_deleting = use_signal(|| false);
    let mut show_rename = use_signal(|| false);
    let mut rename_draft = use_signal(String::new);
    let mut is_renaming = use_signal(|| false);

    let now = chrono::Utc::now();
    let relative_time = format_relative_time(&conversation.updated_at, &now);

    let conversation_id = conversation.id.clone();
    let conversation_id_for_delete = conversation.id.clone();
    let conversation_id_for_rename = conversation.id.clone();
    let user_id_for_delete = user_id.clone();
    let user_id_for_rename = user_id.clone();
    let title_for_rename = conversation.title.clone();

    let mut submit_rename = move || {
        let title = rename_draft.read().trim().to_string();
        if title.is_empty() {
            show_rename.set(false);
            return;
        }
        let user_id = user_id_for_rename.clone();
        let conversation_id = conversation_id_for_rename.clone();
        is_renaming.set(true);
        spawn(async move {
            match rename_conversation(user_id, conversation_id, title).await {
                Ok(_) => {
                    show_rename.set(false);
                    on_renamed.call(());
                }
                Err(e) => {
                    tracing::error!("Failed to rename conversation: {:?}", e);
                }
            }
            is_renaming.set(false);
        });
    };

    rsx! {
        div { class: "c-conversation-item",
            Link {
                class: "c-conversation-item__link",
                to: Route::ConversationView { conversation_id: conversation_id.clone() },

                div { class: "c-conversation-item__icon", "💬" }

                div { class: "c-conversation-item__content",
                    if show_rename() {
                        input {
                            r#type: "text",
                            class: "c-conversation-item__rename-input",
                            value: "{rename_draft}",
                            disabled: is_renaming(),
                            onclick: move |evt| {
                                evt.stop_propagation();
                                evt.prevent_default();
                            },
                            oninput: move |evt| rename_draft.set(evt.value()),
                            onkeydown: move |evt| {
                                if evt.key() == Key::Enter {
                                    evt.prevent_default();
                                    submit_rename();
                                } else if evt.key() == Key::Escape {
                                    show_rename.set(false);
                                }
                            },
                        }
                    } else {
                        div { class: "c-conversation-item__title", "{conversation.title}" }
                        div { class: "c-conversation-item__meta",
                            span { "{conversation.message_count} messages" }
                        }
                    }
                }

                div { class: "c-conversation-item__time", "{relative_time}" }
            }

            button {
                class: "c-conversation-item__rename",
                title: "Rename",
                onclick: move |evt| {
                    evt.stop_propagation();
                    evt.prevent_default();
                    rename_draft.set(title_for_rename.clone());
                    show_rename.set(true);
                },
                "✏️"
            }
            button {
                class: "c-conversation-item__delete",
                title: "Delete",
                onclick: move |evt| {
                    evt.stop_propagation();
                    evt.prevent_default();
                    show_confirm.set(true);
                },
                "🗑️"
            }

            // Confirmation overlay (shown on top when confirming)
            if *show_confirm.read() {
                div { class: "c-conversation-item__confirm-overlay",
                    span { class: "c-conversation-item__confirm-text", "Delete?" }
                    button {
                        class: "c-conversation-item__confirm-btn c-conversation-item__confirm-btn--danger",
                        disabled: *is_deleting.read(),
                        onclick: move |evt| {
                            evt.stop_propagation();
                            let user_id = user_id_for_delete.clone();
                            let conversation_id = conversation_id_for_delete.clone();
                            let on_deleted = on_deleted;
                            is_deleting.set(true);
                            spawn(async move {
                                match delete_conversation(user_id, conversation_id.clone()).await {
                                    Ok(_) => {
                                        on_deleted.call(conversation_id);
                                    }
                                    Err(e) => {
                                        tracing::error!("Failed to delete conversation: {:?}", e);
                                        is_deleting.set(false);
                                        show_confirm.set(false);
                                    }
                                }
                            });
                        },
                        if *is_deleting.read() { "..." } else { "Yes" }
                    }
                    button {
                        class: "c-conversation-item__confirm-btn c-conversation-item__confirm-btn--cancel",
                        onclick: move |evt| {
                            evt.stop_propagation();
                            show_confirm.set(false);
                        },
                        "No"
                    }
                }
            }
        }
    }
}

#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
    // Chat dashboard - fresh conversation
    #[route("/")]
    Home {},

    // Reopen a stored conversation
    #[route("/c/:conversation_id")]
    ConversationView { conversation_id: String },

    // Lookup panels
    #[route("/guidelines")]
    Guidelines {},
    #[route("/drugs")]
    Drugs {},

    #[route("/profile")]
    Profile {},

    // Public read-only snapshot of a published conversation
    #[route("/shared/:share_id")]
    SharedChat { share_id: String },
}

#[component]
pub fn App() -> Element {
    use_effect(|| {
        tracing::info!("MediQuery Hub app initialized");
    });

    rsx! {
        Router::<Route> {}
    }
}

#[component]
fn Layout() -> Element {
    // Use asset!() macro to ensure CSS is bundled and served correctly
    const BUNDLE_CSS: Asset = asset!("/assets/dist/bundle.css");

    use_context_provider(|| ConversationListVersion(Signal::new(0)));

    rsx! {
        document::Link {
            rel: "stylesheet",
            href: BUNDLE_CSS
        },
        // Load WASM bundle for client-side hydration
        document::Script {
            src: "/wasm/mediquery-hub.js",
            r#type: "module"
        },
        div { class: "c-layout",
            // Global navbar spanning full width
            AppNavbar {}

            // Body: sidebar + main content
            div { class: "c-layout__body",
                // Left sidebar with conversation history
                AppSidebar {}

                // Main content area
                main { class: "c-layout__main",
                    Outlet::<Route> {}
                }
            }
        }
    }
}

/// Global navbar with logo, panel navigation and theme toggle
#[component]
fn AppNavbar() -> Element {
    rsx! {
        nav { class: "c-navbar",
            // Left: Logo
            Link {
                to: Route::Home {},
                class: "c-navbar__logo",
                "⚕️ MediQuery Hub"
            }

            // Center: panel navigation
            div { class: "c-navbar__nav",
                Link { to: Route::Home {}, class: "c-navbar__link", "Chat" }
                Link { to: Route::Guidelines {}, class: "c-navbar__link", "Guidelines" }
                Link { to: Route::Drugs {}, class: "c-navbar__link", "Drugs" }
            }

            // Right: theme toggle and profile
            div { class: "c-navbar__actions",
                ThemeToggle {}
                Link {
                    to: Route::Profile {},
                    class: "c-navbar__profile",
                    title: "Your profile",
                    "👤"
                }
            }
        }
    }
}

/// Sidebar with the owner's conversation history, grouped by recency
#[component]
fn AppSidebar() -> Element {
    // Search filter state
    let mut search_query = use_signal(String::new);

    // The session marker only exists in the browser; SSR renders the
    // empty list and hydration fills it in.
    let user_id = use_signal(|| None::<String>);
    #[cfg(target_arch = "wasm32")]
    {
        let mut user_id = user_id;
        use_effect(move || {
            user_id.set(Some(ensure_session_marker()));
        });
    }

    let list_version = use_context::<ConversationListVersion>();
    let mut version_for_delete = list_version.0;
    let mut version_for_rename = list_version.0;

    let conversations_resource = use_resource(move || {
        let version = (list_version.0)();
        let owner = user_id();
        async move {
            match owner {
                Some(owner) => {
                    tracing::debug!("Refreshing conversation list (v{})", version);
                    list_conversations(owner).await
                }
                None => Ok(Vec::new()),
            }
        }
    });

    rsx! {
        aside { class: "c-sidebar",
            // New chat entry point
            nav { class: "c-sidebar__nav-main",
                Link {
                    to: Route::Home {},
                    class: "c-sidebar__nav-item",
                    span { class: "c-sidebar__nav-icon", "✚" }
                    span { class: "c-sidebar__nav-text", "New chat" }
                }
            }

            // Search input (functional)
            div { class: "c-sidebar__search",
                input {
                    r#type: "text",
                    class: "c-sidebar__search-input",
                    placeholder: "🔍 Search conversations...",
                    value: search_query(),
                    oninput: move |evt| search_query.set(evt.value())
                }
            }

            // Conversation history grouped by recency
            nav { class: "c-sidebar__nav",
                match &*conversations_resource.read() {
                    Some(Ok(conversations)) => {
                        let query = search_query.read().to_lowercase();
                        let filtered: Vec<_> = conversations
                            .iter()
                            .filter(|c| query.is_empty() || c.title.to_lowercase().contains(&query))
                            .cloned()
                            .collect();

                        let now = chrono::Utc::now();
                        let grouped = group_conversations_for_display(&filtered, &now);
                        let owner = user_id().unwrap_or_default();

                        rsx! {
                            if grouped.is_empty() {
                                div { class: "c-sidebar__empty",
                                    "No conversations yet. Ask your first question."
                                }
                            } else {
                                for (group_name, group_conversations) in grouped.iter() {
                                    div { class: "c-sidebar__group-header", "{group_name}" }
                                    for conversation in group_conversations {
                                        ConversationItem {
                                            conversation: conversation.clone(),
                                            user_id: owner.clone(),
                                            on_deleted: move |_id: String| {
                                                *version_for_delete.write() += 1;
                                            },
                                            on_renamed: move |_| {
                                                *version_for_rename.write() += 1;
                                            },
                                        }
                                    }
                                }
                            }
                        }
                    }
                    Some(Err(e)) => rsx! {
                        div { class: "c-sidebar__error", "Could not load conversations: {e}" }
                    },
                    None => rsx! {
                        ConversationsLoading {}
                    }
                }
            }
        }
    }
}

#[component]
fn Home() -> Element {
    rsx! {
        ChatPanel {}
    }
}

#[component]
fn ConversationView(conversation_id: String) -> Element {
    rsx! {
        ChatPanel {
            key: "{conversation_id}",
            conversation_id: Some(conversation_id.clone()),
        }
    }
}

#[component]
fn Guidelines() -> Element {
    rsx! {
        GuidelinePanel {}
    }
}

#[component]
fn Drugs() -> Element {
    rsx! {
        DrugPanel {}
    }
}

#[component]
fn Profile() -> Element {
    rsx! {
        ProfilePanel {}
    }
}

#[component]
fn SharedChat(share_id: String) -> Element {
    rsx! {
        SharedChatPage {
            key: "{share_id}",
            share_id: share_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn summary(id: &str, updated_at: DateTime<Utc>) -> ConversationSummary {
        ConversationSummary {
            id: id.to_string(),
            title: format!("Conversation {}", id),
            updated_at,
            message_count: 2,
        }
    }

    #[test]
    fn test_relative_time_recent() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();

        let seconds_ago = now - Duration::seconds(30);
        assert_eq!(format_relative_time(&seconds_ago, &now), "just now");

        let minutes_ago = now - Duration::minutes(5);
        assert_eq!(format_relative_time(&minutes_ago, &now), "5min");

        let hours_ago = now - Duration::hours(3);
        assert_eq!(format_relative_time(&hours_ago, &now), "3h");
    }

    #[test]
    fn test_relative_time_older() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();

        let yesterday = Utc.with_ymd_and_hms(2024, 5, 9, 18, 0, 0).unwrap();
        assert_eq!(format_relative_time(&yesterday, &now), "Yesterday");

        // 2024-05-07 was a Tuesday
        let this_week = Utc.with_ymd_and_hms(2024, 5, 7, 9, 0, 0).unwrap();
        assert_eq!(format_relative_time(&this_week, &now), "Tue");

        let months_back = Utc.with_ymd_and_hms(2024, 3, 12, 9, 0, 0).unwrap();
        assert_eq!(format_relative_time(&months_back, &now), "12 Mar");
    }

    #[test]
    fn test_grouping_buckets_and_order() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        let conversations = vec![
            summary("older", Utc.with_ymd_and_hms(2024, 1, 2, 8, 0, 0).unwrap()),
            summary("today-early", Utc.with_ymd_and_hms(2024, 5, 10, 7, 0, 0).unwrap()),
            summary("today-late", Utc.with_ymd_and_hms(2024, 5, 10, 11, 0, 0).unwrap()),
            summary("yesterday", Utc.with_ymd_and_hms(2024, 5, 9, 10, 0, 0).unwrap()),
        ];

        let grouped = group_conversations_for_display(&conversations, &now);
        let labels: Vec<&str> = grouped.iter().map(|(label, _)| label.as_str()).collect();
        assert_eq!(labels, vec!["Today", "Yesterday", "Older"]);

        // Most recent first inside a group
        assert_eq!(grouped[0].1[0].id, "today-late");
        assert_eq!(grouped[0].1[1].id, "today-early");
    }

    #[test]
    fn test_grouping_skips_empty_buckets() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        let grouped = group_conversations_for_display(&[], &now);
        assert!(grouped.is_empty());
    }
}
