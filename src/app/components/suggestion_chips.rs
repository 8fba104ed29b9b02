//! Suggested question chips shown above an empty chat thread

use dioxus::prelude::*;

#[component]
pub fn SuggestionChips(
    suggestions: Signal<Vec<String>>,
    is_loading: Signal<bool>,
    on_pick: EventHandler<String>,
) -> Element {
    if suggestions.read().is_empty() {
        return rsx! {};
    }

    rsx! {
        div { class: "c-suggestions",
            span { class: "c-suggestions__label", "Try asking" }
            div { class: "c-suggestions__chips",
                for suggestion in suggestions.read().iter() {
                    button {
                        class: "c-suggestions__chip",
                        disabled: *is_loading.read(),
                        onclick: {
                            let suggestion = suggestion.clone();
                            move |_| on_pick.call(suggestion.clone())
                        },
                        "{suggestion}"
                    }
                }
            }
        }
    }
}
