//! Guideline lookup panel: debounced search against the guideline proxy,
//! with per-result summarize and follow-up actions.

use crate::app::components::{CitationList, ErrorMessage, LoadingText};
use crate::domain::models::{GuidelineHit, GuidelineSummaryResponse};
use crate::shared::constants::DEBOUNCE_MS;
use crate::shared::hooks::use_debounced_value;
use crate::shared::services::ApiService;
use dioxus::prelude::*;

#[component]
pub fn GuidelinePanel() -> Element {
    let mut query = use_signal(String::new);
    let debounced_query = use_debounced_value(query, DEBOUNCE_MS);
    let mut results = use_signal(Vec::<GuidelineHit>::new);
    let mut is_searching = use_signal(|| false);
    let mut has_searched = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    // Runs once per settled query, not per keystroke
    use_effect(move || {
        let q = debounced_query();
        spawn(async move {
            let trimmed = q.trim().to_string();
            if trimmed.is_empty() {
                results.set(Vec::new());
                has_searched.set(false);
                error.set(None);
                return;
            }

            is_searching.set(true);
            error.set(None);
            match ApiService::new().search_guidelines(&trimmed).await {
                Ok(response) => results.set(response.results),
                Err(e) => {
                    tracing::error!("Guideline search failed: {}", e);
                    error.set(Some("Guideline search failed. Try again.".to_string()));
                }
            }
            is_searching.set(false);
            has_searched.set(true);
        });
    });

    rsx! {
        div { class: "c-lookup-panel",
            header { class: "c-lookup-panel__header",
                h1 { class: "c-lookup-panel__title", "📋 Clinical Guidelines" }
                p { class: "c-lookup-panel__description",
                    "Search published guidelines, then summarize any result."
                }
            }

            input {
                r#type: "text",
                class: "c-lookup-panel__search",
                placeholder: "Search guidelines, e.g. hypertension management...",
                value: "{query}",
                oninput: move |evt| query.set(evt.value()),
            }

            if let Some(message) = error.read().clone() {
                ErrorMessage { message }
            }

            if is_searching() {
                LoadingText { message: "Searching guidelines..." }
            } else if results.read().is_empty() && has_searched() {
                div { class: "c-lookup-panel__empty", "No guidelines matched that search." }
            } else {
                div { class: "c-lookup-panel__results",
                    for hit in results.read().iter() {
                        GuidelineCard { hit: hit.clone() }
                    }
                }
            }
        }
    }
}

#[component]
fn GuidelineCard(hit: GuidelineHit) -> Element {
    let mut summary = use_signal(|| None::<GuidelineSummaryResponse>);
    let mut followups = use_signal(Vec::<String>::new);
    let mut is_summarizing = use_signal(|| false);
    let mut is_fetching_followups = use_signal(|| false);
    let mut action_error = use_signal(|| None::<String>);

    let summarize_url = hit.url.clone();
    let summarize = move |_| {
        let url = summarize_url.clone();
        is_summarizing.set(true);
        action_error.set(None);
        spawn(async move {
            match ApiService::new().summarize_guideline(&url).await {
                Ok(response) => summary.set(Some(response)),
                Err(e) => {
                    tracing::error!("Guideline summarize failed: {}", e);
                    action_error.set(Some("Could not summarize this guideline.".to_string()));
                }
            }
            is_summarizing.set(false);
        });
    };

    let fetch_followups = move |_| {
        let Some(current) = summary.read().clone() else {
            return;
        };
        is_fetching_followups.set(true);
        action_error.set(None);
        spawn(async move {
            match ApiService::new().guideline_followups(&current.summary).await {
                Ok(response) => followups.set(response.questions),
                Err(e) => {
                    tracing::error!("Guideline followup fetch failed: {}", e);
                    action_error.set(Some("Could not load follow-up questions.".to_string()));
                }
            }
            is_fetching_followups.set(false);
        });
    };

    let summary_html = summary.read().as_ref().map(|s| {
        crate::shared::utils::link_citation_markers(
            &crate::app::components::render_markdown(&s.summary),
            &s.citations,
        )
    });

    rsx! {
        div { class: "c-guideline-card",
            div { class: "c-guideline-card__head",
                a {
                    class: "c-guideline-card__title",
                    href: "{hit.url}",
                    target: "_blank",
                    rel: "noopener noreferrer",
                    "{hit.title}"
                }
                div { class: "c-guideline-card__meta",
                    if let Some(organization) = hit.organization.as_ref() {
                        span { class: "c-guideline-card__org", "{organization}" }
                    }
                    if let Some(year) = hit.year {
                        span { class: "c-guideline-card__year", "{year}" }
                    }
                }
            }

            if let Some(snippet) = hit.snippet.as_ref() {
                p { class: "c-guideline-card__snippet", "{snippet}" }
            }

            div { class: "c-guideline-card__actions",
                button {
                    class: "btn btn--secondary",
                    disabled: is_summarizing(),
                    onclick: summarize,
                    if is_summarizing() { "Summarizing..." } else { "Summarize" }
                }
                if summary.read().is_some() {
                    button {
                        class: "btn btn--secondary",
                        disabled: is_fetching_followups(),
                        onclick: fetch_followups,
                        if is_fetching_followups() { "Loading..." } else { "Follow-up questions" }
                    }
                }
            }

            if let Some(message) = action_error.read().clone() {
                ErrorMessage { message }
            }

            if let (Some(html), Some(current)) = (summary_html, summary.read().clone()) {
                div { class: "c-guideline-card__summary",
                    div {
                        class: "c-guideline-card__summary-text",
                        dangerous_inner_html: "{html}",
                    }
                    if !current.citations.is_empty() {
                        CitationList {
                            citations: current.citations.clone(),
                            answer_text: current.summary.clone(),
                        }
                    }
                }
            }

            if !followups.read().is_empty() {
                ul { class: "c-guideline-card__followups",
                    for question in followups.read().iter() {
                        li { class: "c-guideline-card__followup", "{question}" }
                    }
                }
            }
        }
    }
}
