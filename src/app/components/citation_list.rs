//! Reference list shown under a cited answer

use crate::domain::models::Citation;
use crate::shared::utils::{cited_indices, format_citation};
use dioxus::prelude::*;

/// Numbered reference list for an answer. Only citations actually cited in
/// the text appear, in order of first appearance; the bracket numbers match
/// the inline markers.
#[component]
pub fn CitationList(citations: Vec<Citation>, answer_text: String) -> Element {
    let indices = cited_indices(&answer_text, citations.len());

    // An answer may carry citations it never references inline; fall back
    // to listing them all rather than hiding sources.
    let ordered: Vec<(usize, &Citation)> = if indices.is_empty() {
        citations.iter().enumerate().map(|(i, c)| (i + 1, c)).collect()
    } else {
        indices
            .iter()
            .filter_map(|&n| citations.get(n - 1).map(|c| (n, c)))
            .collect()
    };

    rsx! {
        div { class: "c-citations",
            span { class: "c-citations__label", "References" }
            ol { class: "c-citations__list",
                for (number, citation) in ordered {
                    li { class: "c-citations__item",
                        span { class: "c-citations__number", "[{number}]" }
                        a {
                            class: "c-citations__link",
                            href: "{citation.url}",
                            target: "_blank",
                            rel: "noopener noreferrer",
                            "{format_citation(citation)}"
                        }
                        span {
                            class: "c-citations__badge c-citations__badge--{citation.source.as_str()}",
                            "{citation.source.badge_label()}"
                        }
                    }
                }
            }
        }
    }
}
