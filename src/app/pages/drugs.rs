//! Drug lookup panel backed by the drug search proxy.

use crate::app::components::{ErrorMessage, LoadingText};
use crate::domain::models::DrugHit;
use crate::shared::constants::DEBOUNCE_MS;
use crate::shared::hooks::use_debounced_value;
use crate::shared::services::ApiService;
use dioxus::prelude::*;

#[component]
pub fn DrugPanel() -> Element {
    let mut query = use_signal(String::new);
    let debounced_query = use_debounced_value(query, DEBOUNCE_MS);
    let mut results = use_signal(Vec::<DrugHit>::new);
    let mut is_searching = use_signal(|| false);
    let mut has_searched = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

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
            match ApiService::new().search_drugs(&trimmed).await {
                Ok(response) => results.set(response.results),
                Err(e) => {
                    tracing::error!("Drug search failed: {}", e);
                    error.set(Some("Drug search failed. Try again.".to_string()));
                }
            }
            is_searching.set(false);
            has_searched.set(true);
        });
    });

    rsx! {
        div { class: "c-lookup-panel",
            header { class: "c-lookup-panel__header",
                h1 { class: "c-lookup-panel__title", "💊 Drug Lookup" }
                p { class: "c-lookup-panel__description",
                    "Look up drug classes, indications and reference links."
                }
            }

            input {
                r#type: "text",
                class: "c-lookup-panel__search",
                placeholder: "Search by brand or generic name...",
                value: "{query}",
                oninput: move |evt| query.set(evt.value()),
            }

            if let Some(message) = error.read().clone() {
                ErrorMessage { message }
            }

            if is_searching() {
                LoadingText { message: "Searching drugs..." }
            } else if results.read().is_empty() && has_searched() {
                div { class: "c-lookup-panel__empty", "No drugs matched that search." }
            } else {
                div { class: "c-lookup-panel__results",
                    for hit in results.read().iter() {
                        DrugCard { hit: hit.clone() }
                    }
                }
            }
        }
    }
}

#[component]
fn DrugCard(hit: DrugHit) -> Element {
    rsx! {
        div { class: "c-drug-card",
            div { class: "c-drug-card__head",
                span { class: "c-drug-card__name", "{hit.name}" }
                if let Some(generic) = hit.generic_name.as_ref() {
                    span { class: "c-drug-card__generic", "({generic})" }
                }
            }

            if let Some(drug_class) = hit.drug_class.as_ref() {
                div { class: "c-drug-card__class", "{drug_class}" }
            }

            if !hit.indications.is_empty() {
                ul { class: "c-drug-card__indications",
                    for indication in hit.indications.iter() {
                        li { "{indication}" }
                    }
                }
            }

            if let Some(url) = hit.url.as_ref() {
                a {
                    class: "c-drug-card__link",
                    href: "{url}",
                    target: "_blank",
                    rel: "noopener noreferrer",
                    "Full prescribing reference ↗"
                }
            }
        }
    }
}
